use std::fmt;

use rowan::TextRange;

/// What a diagnostic is about.
///
/// Declaration order is priority order: when one rule reports several kinds
/// at the same range, only the earliest is kept by
/// [`Diagnostics::filtered`](super::Diagnostics::filtered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // The alternative cannot compile at all
    InvalidNegationTarget,
    InconsistentDomain,

    // Names
    UndefinedRule,
    UnknownTokenType,

    // Compiles, but probably not what was meant
    LabelOnNonSet,
    FragmentCycle,
    EmptyComplement,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::FragmentCycle | Self::EmptyComplement => Severity::Warning,
            Self::InvalidNegationTarget
            | Self::InconsistentDomain
            | Self::UndefinedRule
            | Self::UnknownTokenType
            | Self::LabelOnNonSet => Severity::Error,
        }
    }

    /// Message used when the reporter gives no detail.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::InvalidNegationTarget => "negation requires a single-symbol operand",
            Self::InconsistentDomain => "symbol does not belong to this rule's domain",
            Self::UndefinedRule => "undefined rule",
            Self::UnknownTokenType => "rule does not define a token type",
            Self::LabelOnNonSet => "label is assigned to a block which is not a set",
            Self::FragmentCycle => "fragment refers to itself",
            Self::EmptyComplement => "negated set matches nothing",
        }
    }

    /// Message with reporter-provided detail, usually a rule or label name.
    pub fn detailed(&self, detail: &str) -> String {
        match self {
            Self::UndefinedRule => format!("`{detail}` is not defined"),
            Self::UnknownTokenType => format!("`{detail}` does not define a token type"),
            Self::LabelOnNonSet => {
                format!("label `{detail}` is assigned to a block which is not a set")
            }
            Self::FragmentCycle => format!("fragment `{detail}` refers to itself"),
            _ => format!("{}: {detail}", self.summary()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// One compile-time finding, attributed to a rule and a grammar range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) rule: Option<String>,
    /// Underlined when rendered against source.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            rule: None,
            range,
            message: kind.summary().to_string(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
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

/// `error at 3..6 in `expr`: message (hint: ...)`
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = (u32::from(self.range.start()), u32::from(self.range.end()));
        write!(f, "{} at {start}..{end}", self.severity())?;
        if let Some(rule) = &self.rule {
            write!(f, " in `{rule}`")?;
        }
        write!(f, ": {}", self.message)?;
        self.hints
            .iter()
            .try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}
