use crate::source_map::Span;

/// Recoverable problems, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    // Descriptor chain shape
    DirectiveArity,
    UnknownDirective,
    DuplicateDirective,

    // Descriptor targets
    UntypedFlagTarget,
    UnknownFlagTarget,
    DuplicateFlagDescriptor,
    DuplicateSelfDescriptor,

    // Signature
    UnnamedParameter,
    UnsupportedFlagType,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateSelfDescriptor => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateDirective => Some("remove one of the calls"),
            Self::UnknownFlagTarget => {
                Some("`goat.Flag` must be called with a parameter of the enclosing function")
            }
            Self::DuplicateSelfDescriptor => Some("only the first `goat.Self()` is used"),
            Self::UnnamedParameter => Some("name the parameter so it can be bound to a flag"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DirectiveArity => "wrong number of arguments",
            Self::UnknownDirective => "unrecognized directive",
            Self::DuplicateDirective => "duplicate directive",

            Self::UntypedFlagTarget => "cannot determine the type of the flag target",
            Self::UnknownFlagTarget => "flag target is not a parameter",
            Self::DuplicateFlagDescriptor => "parameter is already described",
            Self::DuplicateSelfDescriptor => "action is already described",

            Self::UnnamedParameter => "action parameters must be named",
            Self::UnsupportedFlagType => "unsupported flag type",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownDirective => "`{}` is not a recognized directive".to_string(),
            Self::DuplicateDirective => "`{}` is specified more than once".to_string(),

            Self::UntypedFlagTarget => "cannot determine the type of `{}`".to_string(),
            Self::UnknownFlagTarget => "`{}` is not a parameter of this function".to_string(),
            Self::DuplicateFlagDescriptor => "parameter `{}` is already described".to_string(),

            Self::UnsupportedFlagType => "no flag handler for type `{}`".to_string(),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The span shown to the user (underlined in output).
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
