//! # Headers
//!
//! A header line is a series of whitespace-separated tokens defining the size of the graph and
//! the problem it was created for. The default header written by this crate is
//!     "p irr {n} {m}"
//! where n is the number of nodes and m the number of edges in the graph.

use itertools::Itertools;
use smallvec::{SmallVec, smallvec};

use super::*;

/// A single token in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderToken {
    /// Ignore entry
    Any,
    /// Match entry to str
    Str(String),
    /// Parse number of nodes
    NumNodes,
    /// Parse number of edges
    NumEdges,
    /// Ensure that there are no more entries
    End,
    /// Ignore all further entries
    Rest,
}

/// The complete format of the header, built with the builder pattern:
/// ```ignore
/// let format = HeaderFormat::new()
///     .str("p").str("irr").number_of_nodes().number_of_edges().end();
/// ```
/// The const parameters track whether the node count and edge count positions were set and
/// whether the format was terminated, so only complete formats can be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat<
    const NODES_SET: bool = false,
    const EDGES_SET: bool = false,
    const END: bool = false,
>(SmallVec<[HeaderToken; 6]>);

/// A header is a format with node and edge counts that was terminated.
pub type Header = HeaderFormat<true, true, true>;

impl Default for Header {
    /// Node and edge counts are the third and fourth token; everything else is ignored
    fn default() -> Self {
        Self(smallvec![
            HeaderToken::Any,
            HeaderToken::Any,
            HeaderToken::NumNodes,
            HeaderToken::NumEdges,
            HeaderToken::Rest,
        ])
    }
}

impl Header {
    /// Creates the format `p {problem} {n} {m}`
    pub fn new_problem<S: Into<String>>(problem: S) -> Self {
        Self(smallvec![
            HeaderToken::Str("p".to_string()),
            HeaderToken::Str(problem.into()),
            HeaderToken::NumNodes,
            HeaderToken::NumEdges,
            HeaderToken::End,
        ])
    }

    /// Tries to parse a header line and extract the number of nodes and edges.
    ///
    /// # Errors
    /// Fails if a token does not match, a count cannot be parsed or the line is shorter or
    /// longer than the format allows.
    pub fn parse_header(&self, line: &str) -> Result<(NumNodes, NumEdges)> {
        let mut number_of_nodes = 0;
        let mut number_of_edges = 0;

        let mut parts = line.split_whitespace();

        for token in &self.0 {
            match token {
                HeaderToken::Rest => return Ok((number_of_nodes, number_of_edges)),
                HeaderToken::End => {
                    raise_error_unless!(
                        parts.next().is_none(),
                        ErrorKind::InvalidData,
                        "Header is longer than expected"
                    );
                    return Ok((number_of_nodes, number_of_edges));
                }
                HeaderToken::Any => {
                    raise_error_unless!(
                        parts.next().is_some(),
                        ErrorKind::InvalidData,
                        "Header is shorter than expected"
                    );
                }
                HeaderToken::Str(expected) => {
                    let entry = parts.next();
                    raise_error_unless!(
                        entry == Some(expected.as_str()),
                        ErrorKind::InvalidData,
                        format!("Invalid header: expected {expected:?}, found {entry:?}")
                    );
                }
                HeaderToken::NumNodes => {
                    number_of_nodes = parse_next_value!(parts, "Header>Number of nodes");
                }
                HeaderToken::NumEdges => {
                    number_of_edges = parse_next_value!(parts, "Header>Number of edges");
                }
            }
        }

        // complete formats always end with `End` or `Rest`
        unreachable!("header format is not terminated")
    }

    /// Writes the header for a graph with `n` nodes and `m` edges
    pub fn write_header<W: Write>(&self, writer: &mut W, n: NumNodes, m: NumEdges) -> Result<()> {
        let line = self
            .0
            .iter()
            .filter_map(|token| match token {
                HeaderToken::Any => Some("0".to_string()),
                HeaderToken::Str(s) => Some(s.clone()),
                HeaderToken::NumNodes => Some(n.to_string()),
                HeaderToken::NumEdges => Some(m.to_string()),
                HeaderToken::End | HeaderToken::Rest => None,
            })
            .join(" ");

        writeln!(writer, "{line}")
    }
}

impl HeaderFormat<false, false, false> {
    /// Creates a new empty format
    pub fn new() -> Self {
        HeaderFormat(smallvec![])
    }
}

impl<const NODES_SET: bool, const EDGES_SET: bool> HeaderFormat<NODES_SET, EDGES_SET, false> {
    /// Pushes a token that is ignored
    pub fn any(mut self) -> Self {
        self.0.push(HeaderToken::Any);
        self
    }

    /// Pushes a token that must match `s`
    pub fn str<S: Into<String>>(mut self, s: S) -> Self {
        self.0.push(HeaderToken::Str(s.into()));
        self
    }
}

impl<const EDGES_SET: bool> HeaderFormat<false, EDGES_SET, false> {
    /// Pushes the position of the number of nodes
    pub fn number_of_nodes(mut self) -> HeaderFormat<true, EDGES_SET, false> {
        self.0.push(HeaderToken::NumNodes);
        HeaderFormat(self.0)
    }
}

impl<const NODES_SET: bool> HeaderFormat<NODES_SET, false, false> {
    /// Pushes the position of the number of edges
    pub fn number_of_edges(mut self) -> HeaderFormat<NODES_SET, true, false> {
        self.0.push(HeaderToken::NumEdges);
        HeaderFormat(self.0)
    }
}

impl HeaderFormat<true, true, false> {
    /// Terminates the format; no further tokens may follow
    pub fn end(mut self) -> Header {
        self.0.push(HeaderToken::End);
        HeaderFormat(self.0)
    }

    /// Terminates the format; all further tokens are ignored
    pub fn ignore_rest(mut self) -> Header {
        self.0.push(HeaderToken::Rest);
        HeaderFormat(self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_header() {
        let header = Header::default();
        assert_eq!(header.parse_header("p irr 17 28").unwrap(), (17, 28));
        assert_eq!(header.parse_header("p  ds 4 6 extra tokens").unwrap(), (4, 6));
        assert!(header.parse_header("p irr 17").is_err());
        assert!(header.parse_header("p irr x 28").is_err());
    }

    #[test]
    fn problem_header() {
        let header = Header::new_problem("irr");
        assert_eq!(header.parse_header("p irr 3 2").unwrap(), (3, 2));
        assert!(header.parse_header("p ds 3 2").is_err());
        assert!(header.parse_header("p irr 3 2 1").is_err());
        assert!(header.parse_header("").is_err());

        let mut buffer = Vec::new();
        header.write_header(&mut buffer, 21, 20).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "p irr 21 20\n");
    }

    #[test]
    fn custom_header() {
        let header = HeaderFormat::new()
            .number_of_edges()
            .any()
            .number_of_nodes()
            .ignore_rest();
        assert_eq!(header.parse_header("5 x 4").unwrap(), (4, 5));

        let mut buffer = Vec::new();
        header.write_header(&mut buffer, 4, 5).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "5 0 4\n");
    }
}
