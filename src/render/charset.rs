use crate::prelude::*;
use std::borrow::Cow;
use std::fmt;

/// Glyphs used to draw the branches of the tree
#[derive(Debug, PartialEq, Eq)]
pub struct TreeChars {
    /// Between the branch and the pid, for a process without children
    pub leaf: &'static str,
    /// Between the branch and the pid, for a process with children
    pub parent: &'static str,
    pub group_leader: &'static str,
    pub not_group_leader: &'static str,
    /// Branch to a process followed by siblings
    pub branch: &'static str,
    /// Vertical line continuing past a process followed by siblings
    pub bar: &'static str,
    /// Branch to the last sibling
    pub last_branch: &'static str,
    /// Switch to the alternate character set
    pub start_graphics: &'static str,
    /// Switch back from the alternate character set
    pub end_graphics: &'static str,
    /// Sent once before the first line
    pub init: &'static str,
}

const ASCII: TreeChars = TreeChars {
    leaf: "--",
    parent: "-+",
    group_leader: "=",
    not_group_leader: "-",
    branch: "|",
    bar: "|",
    last_branch: "\\",
    start_graphics: "",
    end_graphics: "",
    init: "",
};

// Drawn with the box characters, transcoded to code page 850 on output
const PC850: TreeChars = TreeChars {
    leaf: "──",
    parent: "─┬",
    group_leader: "·",
    not_group_leader: "─",
    branch: "├",
    bar: "│",
    last_branch: "└",
    start_graphics: "",
    end_graphics: "",
    init: "",
};

// Letters of the DEC special graphics set, selected through SO/SI
const VT100: TreeChars = TreeChars {
    leaf: "qq",
    parent: "qw",
    group_leader: "`",
    not_group_leader: "q",
    branch: "t",
    bar: "x",
    last_branch: "m",
    start_graphics: "\x0e",
    end_graphics: "\x0f",
    init: "\x1b(B\x1b)0",
};

const UTF8: TreeChars = TreeChars {
    leaf: "──",
    parent: "─┬",
    group_leader: "=",
    not_group_leader: "─",
    branch: "├",
    bar: "│",
    last_branch: "└",
    start_graphics: "",
    end_graphics: "",
    init: "",
};

/// Character set variant, selected by index on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Graphics {
    #[default]
    Ascii = 0,
    Pc850 = 1,
    Vt100 = 2,
    Utf8 = 3,
}

impl Graphics {
    pub fn chars(self) -> &'static TreeChars {
        match self {
            Graphics::Ascii => &ASCII,
            Graphics::Pc850 => &PC850,
            Graphics::Vt100 => &VT100,
            Graphics::Utf8 => &UTF8,
        }
    }

    /// Bytes to write for a rendered line
    pub fn encode(self, line: &str) -> Cow<'_, [u8]> {
        match self {
            Graphics::Pc850 => Cow::Owned(
                line.chars()
                    .flat_map(|c| match to_cp850(c) {
                        Some(byte) => vec![byte],
                        None => c.to_string().into_bytes(),
                    })
                    .collect(),
            ),
            _ => Cow::Borrowed(line.as_bytes()),
        }
    }
}

fn to_cp850(c: char) -> Option<u8> {
    match c {
        '─' => Some(0xc4),
        '┬' => Some(0xc2),
        '·' => Some(0xfa),
        '├' => Some(0xc3),
        '│' => Some(0xb3),
        '└' => Some(0xc0),
        _ => None,
    }
}

impl TryFrom<u8> for Graphics {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Graphics::Ascii),
            1 => Ok(Graphics::Pc850),
            2 => Ok(Graphics::Vt100),
            3 => Ok(Graphics::Utf8),
            _ => bail!(
                "Invalid graphics parameter {value}, expected 0=ASCII, 1=IBM-850, 2=VT100 or 3=UTF-8"
            ),
        }
    }
}

impl fmt::Display for Graphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Graphics::Ascii => "ASCII",
            Graphics::Pc850 => "IBM-850",
            Graphics::Vt100 => "VT100",
            Graphics::Utf8 => "UTF-8",
        };
        write!(f, "{name}")
    }
}
