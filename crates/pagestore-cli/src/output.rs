// Output formatting

use std::io::IsTerminal;

use colored::Colorize;
use pagestore_domain::{Block, Route};

/// Terminal styling
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputStyle {
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// One route per line: path, name, then content files
    pub fn route_line(&self, route: &Route) -> String {
        let blocks = route
            .block_ids()
            .iter()
            .map(|b| b.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let path = if self.use_colors {
            route.path().as_str().cyan().bold().to_string()
        } else {
            route.path().to_string()
        };
        if blocks.is_empty() {
            format!("{path}  {}", route.name())
        } else {
            format!("{path}  {}  [{blocks}]", route.name())
        }
    }

    pub fn block_line(&self, index: usize, block: &Block) -> String {
        let headline = match block {
            Block::Header(props) => &props.headline,
            Block::Hero(props) => &props.headline,
        };
        let kind = if self.use_colors {
            block.kind().yellow().to_string()
        } else {
            block.kind().to_string()
        };
        format!("{:>2}. {kind}: {headline}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestore_domain::PageContent;

    #[test]
    fn test_plain_route_line() {
        let line = OutputStyle::plain().route_line(&Route::homepage());
        assert_eq!(line, "/  homepage  [data/content/homepage.json]");
    }

    #[test]
    fn test_plain_block_line() {
        let content = PageContent::default_homepage();
        let line = OutputStyle::plain().block_line(0, &content.blocks()[0]);
        assert_eq!(line, " 1. Header: Eng Manager");
    }

    #[test]
    fn test_plain_messages() {
        let style = OutputStyle::plain();
        assert_eq!(style.success("done"), "✓ done");
        assert_eq!(style.error("failed"), "✗ failed");
    }
}
