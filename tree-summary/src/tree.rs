//! Tree lines and the Markdown document they are assembled into.

use std::fmt;
use std::io;
use std::path::Path;

pub const DOCUMENT_TITLE: &str = "# Project Structure Summary";

/// Glyph placed before an entry's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// A sibling follows.
    Tee,
    /// Last entry of its sibling group.
    Corner,
}

impl Connector {
    pub fn for_position(index: usize, total: usize) -> Self {
        if index + 1 == total {
            Connector::Corner
        } else {
            Connector::Tee
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Connector::Tee => "├─ ",
            Connector::Corner => "└─ ",
        }
    }

    /// Prefix segment that children of this entry are drawn under.
    pub fn child_indent(self) -> &'static str {
        match self {
            Connector::Tee => "│   ",
            Connector::Corner => "    ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeLineKind {
    Entry { connector: Connector, label: String },
    Bullet { text: String },
}

/// One rendered row: either a filesystem entry or a summary bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub prefix: String,
    pub kind: TreeLineKind,
}

impl TreeLine {
    pub fn directory(prefix: &str, connector: Connector, name: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            kind: TreeLineKind::Entry {
                connector,
                label: format!("{}/", name),
            },
        }
    }

    pub fn file(prefix: &str, connector: Connector, name: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            kind: TreeLineKind::Entry {
                connector,
                label: name.to_string(),
            },
        }
    }

    /// A bullet hanging under the entry drawn at `prefix`.
    pub fn bullet(prefix: &str, text: impl Into<String>) -> Self {
        Self {
            prefix: prefix.to_string(),
            kind: TreeLineKind::Bullet { text: text.into() },
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, TreeLineKind::Bullet { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            TreeLineKind::Entry { label, .. } => Some(label),
            TreeLineKind::Bullet { .. } => None,
        }
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TreeLineKind::Entry { connector, label } => {
                write!(f, "{}{}{}", self.prefix, connector.glyph(), label)
            }
            TreeLineKind::Bullet { text } => write!(f, "{}    - {}", self.prefix, text),
        }
    }
}

/// Title, a blank line, then one row per tree line. No trailing newline.
pub fn render_document(lines: &[TreeLine]) -> String {
    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(DOCUMENT_TITLE.to_string());
    rows.push(String::new());
    rows.extend(lines.iter().map(|line| line.to_string()));
    rows.join("\n")
}

/// Writes the rendered document, replacing whatever was at `path`.
pub fn write_document(path: &Path, lines: &[TreeLine]) -> io::Result<()> {
    std::fs::write(path, render_document(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_connector_position() {
        assert_eq!(Connector::for_position(0, 3), Connector::Tee);
        assert_eq!(Connector::for_position(1, 3), Connector::Tee);
        assert_eq!(Connector::for_position(2, 3), Connector::Corner);
        assert_eq!(Connector::for_position(0, 1), Connector::Corner);
    }

    #[test]
    fn test_line_rendering() {
        let dir = TreeLine::directory("", Connector::Tee, "src");
        assert_eq!(dir.to_string(), "├─ src/");

        let file = TreeLine::file("│   ", Connector::Corner, "app.py");
        assert_eq!(file.to_string(), "│   └─ app.py");
        assert_eq!(file.label(), Some("app.py"));

        let bullet = TreeLine::bullet("│   ", "main: entry point");
        assert_eq!(bullet.to_string(), "│       - main: entry point");
        assert!(bullet.is_bullet());
        assert_eq!(bullet.label(), None);
    }

    #[test]
    fn test_render_document_header() {
        let lines = vec![
            TreeLine::directory("", Connector::Tee, "src"),
            TreeLine::file("│   ", Connector::Corner, "app.py"),
            TreeLine::file("", Connector::Corner, "README.md"),
        ];
        assert_eq!(
            render_document(&lines),
            "# Project Structure Summary\n\n├─ src/\n│   └─ app.py\n└─ README.md"
        );
        assert_eq!(render_document(&[]), "# Project Structure Summary\n");
    }

    #[test]
    fn test_write_document_overwrites() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("summary.md");
        std::fs::write(&out, "stale content that is much longer than the new one").unwrap();

        write_document(&out, &[TreeLine::file("", Connector::Corner, "a.py")]).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "# Project Structure Summary\n\n└─ a.py");
    }
}
