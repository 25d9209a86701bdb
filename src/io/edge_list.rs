//! # EdgeList
//!
//! The EdgeList-Format consists of a header, followed by `m` non-comment-lines `u v [w]`
//! representing an edge `Edge(u - 1, v - 1)` of weight `w`. Missing weights default to `1`.

use std::io::Lines;

use super::*;

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// HeaderFormat
    header: Header,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
    /// Largest admissible weight of the created graph; `None` means no limit
    max_edge_weight: Option<Weight>,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            header: Header::default(),
            comment_identifier: "c".to_string(),
            max_edge_weight: None,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> Self {
        self.header = format;
        self
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.comment_identifier = c.into();
        self
    }

    /// Sets the largest weight the created graph accepts, both in the input and for later
    /// weight changes. By default, weights are not limited.
    pub fn max_edge_weight(mut self, max_edge_weight: Weight) -> Self {
        self.max_edge_weight = Some(max_edge_weight);
        self
    }
}

impl GraphReader<WeightedGraph> for EdgeListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<WeightedGraph> {
        let mut lines = EdgeListLines::try_new(reader, &self.header, &self.comment_identifier)?;
        let n = lines.number_of_nodes();

        // the header is untrusted, so its edge count is not used to preallocate
        let mut edges = Vec::new();
        while let Some(weighted_edge) = lines.try_next_edge()? {
            edges.push(weighted_edge);
        }

        raise_error_unless!(
            edges.len() == lines.number_of_edges() as usize,
            ErrorKind::InvalidData,
            format!(
                "Header announces {} edges, but {} were found",
                lines.number_of_edges(),
                edges.len()
            )
        );

        let max_edge_weight = self.max_edge_weight.unwrap_or(Weight::MAX);
        Ok(WeightedGraph::try_with_weights(n, edges, max_edge_weight)?)
    }
}

/// Trait for creating graphs from an EdgeListReader with default settings
pub trait EdgeListRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl EdgeListRead for WeightedGraph {
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }
}

/// Line-level parser of the EdgeList-Format
struct EdgeListLines<'a, R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
    comment_identifier: &'a str,
}

impl<'a, R: BufRead> EdgeListLines<'a, R> {
    /// Creates the parser and tries to parse the first non-comment-line as the header
    fn try_new(reader: R, header: &Header, comment_identifier: &'a str) -> Result<Self> {
        let mut parser = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
            number_of_edges: 0,
            comment_identifier,
        };

        let line = parser
            .next_non_comment_line()?
            .ok_or_else(|| io_error!(ErrorKind::NotFound, "Header not found"))?;
        (parser.number_of_nodes, parser.number_of_edges) = header.parse_header(&line)?;

        Ok(parser)
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    /// Returns the next non-comment-line that is not blank
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line?;
            if line.starts_with(self.comment_identifier) || line.trim().is_empty() {
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }

    /// Tries to parse a weighted edge from the next non-comment-line
    fn try_next_edge(&mut self) -> Result<Option<(Edge, Weight)>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();
        let from: Node = parse_next_value!(parts, "Source node");
        let dest: Node = parse_next_value!(parts, "Target node");
        let weight: Weight = match parts.next() {
            None => 1,
            Some(token) => token.parse().map_err(|_| {
                io_error!(
                    ErrorKind::InvalidData,
                    format!("Invalid value {token:?} found. Cannot parse Weight.")
                )
            })?,
        };

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Too many tokens in edge line {line:?}")
        );
        for x in [from, dest] {
            raise_error_unless!(
                (1..=self.number_of_nodes).contains(&x),
                ErrorKind::InvalidData,
                format!("Node {x} is not in 1..={}", self.number_of_nodes)
            );
        }

        Ok(Some((Edge(from - 1, dest - 1), weight)))
    }
}

/// A writer for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListWriter {
    /// HeaderFormat
    header: Header,
    /// If *true*, every edge line carries the weight of the edge
    write_weights: bool,
}

impl Default for EdgeListWriter {
    fn default() -> Self {
        Self {
            header: Header::new_problem("irr"),
            write_weights: true,
        }
    }
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> Self {
        self.header = format;
        self
    }

    /// Sets whether weights are written
    pub fn write_weights(mut self, write_weights: bool) -> Self {
        self.write_weights = write_weights;
        self
    }
}

impl<G: EdgeWeights> GraphWriter<G> for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        self.header.write_header(
            &mut writer,
            graph.number_of_nodes(),
            graph.number_of_edges(),
        )?;

        for (Edge(u, v), w) in graph.edges().zip(graph.weights()) {
            if self.write_weights {
                writeln!(writer, "{} {} {w}", u + 1, v + 1)?;
            } else {
                writeln!(writer, "{} {}", u + 1, v + 1)?;
            }
        }

        Ok(())
    }
}

/// Trait for writing a graph in the EdgeList-Format with default settings
pub trait EdgeListWrite {
    /// Tries to write the graph to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(&mut writer)?;
        writer.flush()
    }
}

impl<G: EdgeWeights> EdgeListWrite for G {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter::default().try_write_graph(self, writer)
    }
}
