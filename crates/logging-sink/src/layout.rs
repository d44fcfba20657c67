use colored::Colorize;

use crate::level::EmitLevel;

/// How a sink tags each report with its level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SeverityTag {
    /// No tag; the report is written verbatim.
    #[default]
    None,
    /// Single bracketed letter, e.g. `[W] `.
    Letter,
    /// Level name right-aligned in eight columns, e.g. `[ warning] `.
    Name,
}

/// Decoration applied by a sink before a report reaches its writer.
///
/// Console sinks use [`SinkLayout::console`], which tags reports with a
/// single letter and optionally colours the whole line by level. File sinks
/// use [`SinkLayout::file`], which spells the level name out and never
/// colours.
///
/// # Examples
///
/// ```
/// use logging_sink::{EmitLevel, SinkLayout};
///
/// assert_eq!(SinkLayout::console(true, false).render(EmitLevel::Warn, "late"), "[W] late");
/// assert_eq!(SinkLayout::file(true).render(EmitLevel::Info, "ok"), "[    info] ok");
/// assert_eq!(SinkLayout::PLAIN.render(EmitLevel::Error, "raw"), "raw");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SinkLayout {
    tag: SeverityTag,
    colored: bool,
}

impl SinkLayout {
    /// Writes reports verbatim.
    pub const PLAIN: Self = Self {
        tag: SeverityTag::None,
        colored: false,
    };

    /// Builds a layout from its parts.
    #[must_use]
    pub const fn new(tag: SeverityTag, colored: bool) -> Self {
        Self { tag, colored }
    }

    /// Console layout: letter tag when `print_severity`, optional colouring.
    #[must_use]
    pub const fn console(print_severity: bool, colored: bool) -> Self {
        let tag = if print_severity {
            SeverityTag::Letter
        } else {
            SeverityTag::None
        };
        Self { tag, colored }
    }

    /// File layout: padded level name when `print_severity`, never coloured.
    #[must_use]
    pub const fn file(print_severity: bool) -> Self {
        let tag = if print_severity {
            SeverityTag::Name
        } else {
            SeverityTag::None
        };
        Self {
            tag,
            colored: false,
        }
    }

    /// Returns the tag style.
    #[must_use]
    pub const fn tag(&self) -> SeverityTag {
        self.tag
    }

    /// Reports whether lines are coloured by level.
    #[must_use]
    pub const fn colored(&self) -> bool {
        self.colored
    }

    /// Renders `text` for `level` without a trailing newline.
    #[must_use]
    pub fn render(&self, level: EmitLevel, text: &str) -> String {
        let line = match self.tag {
            SeverityTag::None => text.to_owned(),
            SeverityTag::Letter => format!("[{}] {text}", level.letter()),
            SeverityTag::Name => format!("[{:>8}] {text}", level.as_str()),
        };
        if self.colored {
            paint(level, &line)
        } else {
            line
        }
    }
}

fn paint(level: EmitLevel, line: &str) -> String {
    let painted = match level {
        EmitLevel::Trace => line.white(),
        EmitLevel::Debug => line.cyan(),
        EmitLevel::Info => line.green(),
        EmitLevel::Warn => line.yellow().bold(),
        EmitLevel::Error => line.red().bold(),
        EmitLevel::Critical => line.white().bold().on_red(),
        EmitLevel::Off => return line.to_owned(),
    };
    painted.to_string()
}
