use colored::Colorize;

use crate::{
    ast::ast::ErrorNode,
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
};

/// Formats diagnostics as a header, the source name and the offending line
/// with a caret under the error position:
///
/// ```text
/// error[KLS1001]: Unknown variable name: b
/// -> shell
///   |
/// 1 | def foo(a) b;
///   | -----------^
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    use_colors: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { use_colors: true }
    }

    pub fn without_colors() -> Self {
        Renderer { use_colors: false }
    }

    pub fn render(&self, source_name: &str, source: &str, error: &ErrorNode) -> String {
        let severity = if self.use_colors {
            error.severity.colored_name().to_string()
        } else {
            error.severity.to_string()
        };

        let mut output = format!("{}[{}]: {}\n", severity, error.code, error.message);
        output.push_str(&format!("-> {}\n", source_name));

        if !error.span.is_null() {
            output.push_str(&self.source_excerpt(source, error.span.start.0));
        }

        output
    }

    /// Renders a host level syntax error with its name and tip.
    pub fn render_error(&self, source_name: &str, source: &str, error: &Error) -> String {
        let label = if self.use_colors {
            "Error".red().bold().to_string()
        } else {
            String::from("Error")
        };

        let mut output = match error.get_tip() {
            ErrorTip::None => format!("{}: {}\n", label, error.get_error_name()),
            tip => format!("{}: {} ({})\n", label, error.get_error_name(), tip),
        };
        output.push_str(&format!("-> {}\n", source_name));
        output.push_str(&self.source_excerpt(source, error.get_position().0));

        output
    }

    fn source_excerpt(&self, source: &str, position: u32) -> String {
        let Some((line, line_text, line_pos)) = get_line_at_position(source, position) else {
            return String::new();
        };

        let line_str = line.to_string();
        let padding = line_str.len() + 2;

        let trimmed = line_text.trim_start_matches([' ', '\t']);
        let removed_whitespace = line_text.len() - trimmed.len();
        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

        let arrow = if self.use_colors {
            "^".red().bold().to_string()
        } else {
            String::from("^")
        };

        let mut output = format!("{:>padding$}\n", "|");
        output.push_str(&format!("{} | {}\n", line_str, trimmed.trim_end()));
        output.push_str(&format!("{:>padding$} {}{}\n", "|", "-".repeat(arrows - 1), arrow));
        output
    }
}

/// Renders `error` with colours.
pub fn render_diagnostic(source_name: &str, source: &str, error: &ErrorNode) -> String {
    Renderer::new().render(source_name, source, error)
}
