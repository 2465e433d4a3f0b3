/*!
# Penazzi Edge Format

A file consists of
- any number of comment lines (starting with a configurable **comment identifier**, default
  `"c"`) and blank lines, which are skipped everywhere,
- a [`Header`] line `p edge {n} {m} [flag]`,
- exactly `m` lines `e x y [values]` where the number of values is fixed by the kind.

Reading writes one builder slot per edge line (`0..m`) and formats the graph once at the end.

# Examples

## Reading a graph
```
use flowgraphs::{prelude::*, io::*};
use std::io::Cursor;

let data = b"c a weighted triangle\np edge 3 3 w\ne 0 1 4\ne 1 2 1\ne 0 2 7\n";
let g: Graph<Weighted> = PenazziReader::new().try_read_graph(Cursor::new(&data[..])).unwrap();

assert_eq!(g.number_of_edges(), 3);
assert_eq!(g.edge_weight(2, 1), Some(1));
```

## Writing a graph
```
use flowgraphs::{prelude::*, io::*};

let g = Graph::<Digraph>::from_edges(3, [(2, 0), (0, 1)]).unwrap();

let mut buffer = Vec::new();
g.try_write_penazzi(&mut buffer).unwrap();
assert_eq!(String::from_utf8(buffer).unwrap(), "p edge 3 2 d\ne 0 1\ne 2 0\n");
```
*/

use std::io::Lines;

use itertools::Itertools;
use smallvec::SmallVec;
use tracing::debug;

use super::*;

/// A configurable reader for the `p edge` format
#[derive(Debug, Clone)]
pub struct PenazziReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for PenazziReader {
    fn default() -> Self {
        Self {
            comment_identifier: "c".to_string(),
        }
    }
}

impl PenazziReader {
    /// Creates a new reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the identifier used for detecting comment lines
    pub fn set_comment_identifier<S>(&mut self, c: S)
    where
        S: Into<String>,
    {
        self.comment_identifier = c.into();
    }

    /// Updates the comment identifier, consuming and returning `self` for chaining.
    ///
    /// ```
    /// use flowgraphs::io::*;
    ///
    /// let reader = PenazziReader::new().comment_identifier("%");
    /// ```
    pub fn comment_identifier<S>(mut self, c: S) -> Self
    where
        S: Into<String>,
    {
        self.set_comment_identifier(c);
        self
    }

    /// Reads a graph whose kind is decided by the header flag
    ///
    /// ```
    /// use flowgraphs::{prelude::*, io::*};
    /// use std::io::Cursor;
    ///
    /// let data = b"p edge 2 1 f\ne 0 1 0 5\n";
    /// let g = PenazziReader::new().read_any(Cursor::new(&data[..])).unwrap();
    ///
    /// assert!(matches!(g, AnyGraph::Network(_)));
    /// ```
    pub fn read_any<R: BufRead>(&self, reader: R) -> Result<AnyGraph> {
        let mut lines = ContentLines::new(reader, &self.comment_identifier);
        let header = lines.header()?;

        Ok(match header.flag.as_deref() {
            flag if Plain::accepts_flag(flag) => lines.body::<Plain>(&header)?.into(),
            flag if Colored::accepts_flag(flag) => lines.body::<Colored>(&header)?.into(),
            flag if Weighted::accepts_flag(flag) => lines.body::<Weighted>(&header)?.into(),
            flag if Digraph::accepts_flag(flag) => lines.body::<Digraph>(&header)?.into(),
            flag if WeightedDigraph::accepts_flag(flag) => {
                lines.body::<WeightedDigraph>(&header)?.into()
            }
            flag if Network::accepts_flag(flag) => lines.body::<Network>(&header)?.into(),
            flag => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Unknown graph flag {flag:?}")
                ));
            }
        })
    }

    /// Reads a graph whose kind is decided by the header flag from a file
    pub fn read_any_file<P: AsRef<Path>>(&self, path: P) -> Result<AnyGraph> {
        self.read_any(BufReader::new(File::open(path)?))
    }
}

impl<K: GraphKind> GraphReader<Graph<K>> for PenazziReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<Graph<K>> {
        let mut lines = ContentLines::new(reader, &self.comment_identifier);
        let header = lines.header()?;

        raise_error_unless!(
            header.matches_kind::<K>(),
            ErrorKind::InvalidData,
            format!(
                "Header flag {:?} does not match the expected flag {:?}",
                header.flag,
                K::FLAG
            )
        );

        lines.body::<K>(&header)
    }
}

/// Non-comment, non-blank lines of a reader
struct ContentLines<'a, R> {
    lines: Lines<R>,
    comment_identifier: &'a str,
}

impl<'a, R: BufRead> ContentLines<'a, R> {
    fn new(reader: R, comment_identifier: &'a str) -> Self {
        Self {
            lines: reader.lines(),
            comment_identifier,
        }
    }

    /// Returns the next content line if it exists or propagates an error
    fn next_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(self.comment_identifier) {
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }

    fn header(&mut self) -> Result<Header> {
        let line = self
            .next_line()?
            .ok_or(io_error!(ErrorKind::InvalidData, "Header not found"))?;
        Header::parse(&line)
    }

    /// Reads exactly `m` edge lines into a builder and formats it.
    /// Slots grow with the lines actually read, never with the declared `m`.
    fn body<K: GraphKind>(&mut self, header: &Header) -> Result<Graph<K>> {
        let m = header.number_of_edges;
        let mut builder = GraphBuilder::<K>::new(header.number_of_nodes, 0);

        for i in 0..m {
            let line = self.next_line()?.ok_or(io_error!(
                ErrorKind::InvalidData,
                format!("Expected {m} edges, found only {i}")
            ))?;
            builder.push_edge(parse_edge_line::<K::Payload>(&line)?)?;
        }

        raise_error_unless!(
            self.next_line()?.is_none(),
            ErrorKind::InvalidData,
            format!("Expected {m} edges, found more")
        );

        let graph = builder.finalize()?;
        debug!(
            n = graph.number_of_nodes(),
            m = graph.number_of_edges(),
            flag = ?K::FLAG,
            "read graph"
        );
        Ok(graph)
    }
}

/// Parses `e x y` followed by exactly `P::COLUMNS` values
fn parse_edge_line<P: EdgePayload>(line: &str) -> Result<EdgeRecord<P>> {
    let tokens: SmallVec<[&str; 5]> = line.split_whitespace().collect();
    raise_error_unless!(
        tokens.first() == Some(&"e"),
        ErrorKind::InvalidData,
        format!("Invalid edge line {line:?}, expected `e`")
    );
    raise_error_unless!(
        tokens.len() == 3 + P::COLUMNS,
        ErrorKind::InvalidData,
        format!(
            "Edge line {line:?} must have {} values after `e`",
            2 + P::COLUMNS
        )
    );

    let mut parts = tokens[1..].iter();
    let x: Node = parse_next_value!(parts, "Source node");
    let y: Node = parse_next_value!(parts, "Target node");

    let mut values: SmallVec<[u32; 2]> = SmallVec::new();
    for _ in 0..P::COLUMNS {
        values.push(parse_next_value!(parts, "Edge value"));
    }

    Ok(EdgeRecord::new(x, y, P::from_columns(&values)?))
}

/// A writer for the `p edge` format
#[derive(Debug, Clone, Default)]
pub struct PenazziWriter {
    /// Write every stored record instead of one line per logical edge
    record_dump: bool,
}

impl PenazziWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *true*, undirected graphs are written with both records `(x, y)` and `(y, x)` of every
    /// edge (`2m` edge lines below a header declaring `m`). Such dumps cannot be read back.
    pub fn set_record_dump(&mut self, record_dump: bool) {
        self.record_dump = record_dump;
    }

    /// Sets the record dump mode, consuming and returning `self` for chaining
    pub fn record_dump(mut self, record_dump: bool) -> Self {
        self.set_record_dump(record_dump);
        self
    }
}

impl<K: GraphKind> GraphWriter<Graph<K>> for PenazziWriter {
    fn try_write_graph<W: Write>(&self, graph: &Graph<K>, mut writer: W) -> Result<()> {
        Header::of_graph(graph).write_header(&mut writer)?;

        let records: Box<dyn Iterator<Item = &EdgeRecord<K::Payload>> + '_> = if self.record_dump {
            Box::new(graph.records().iter())
        } else {
            Box::new(graph.logical_records())
        };

        for record in records {
            let Edge(x, y) = record.edge;
            let columns = record.payload.columns();
            if columns.is_empty() {
                writeln!(writer, "e {x} {y}")?;
            } else {
                writeln!(writer, "e {x} {y} {}", columns.iter().join(" "))?;
            }
        }

        Ok(())
    }
}

/// Trait for creating graphs from a [`PenazziReader`] with default settings
pub trait PenazziRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_penazzi<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_penazzi_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_penazzi(BufReader::new(File::open(path)?))
    }
}

impl<K: GraphKind> PenazziRead for Graph<K> {
    fn try_read_penazzi<R: BufRead>(reader: R) -> Result<Self> {
        PenazziReader::default().try_read_graph(reader)
    }
}

impl PenazziRead for AnyGraph {
    fn try_read_penazzi<R: BufRead>(reader: R) -> Result<Self> {
        PenazziReader::default().read_any(reader)
    }
}

/// Trait for writing graphs with a [`PenazziWriter`] with default settings
pub trait PenazziWrite {
    /// Tries to write the graph to a given writer
    fn try_write_penazzi<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a given file
    fn try_write_penazzi_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_penazzi(&mut writer)?;
        writer.flush()
    }
}

impl<K: GraphKind> PenazziWrite for Graph<K> {
    fn try_write_penazzi<W: Write>(&self, writer: W) -> Result<()> {
        PenazziWriter::default().try_write_graph(self, writer)
    }
}

impl PenazziWrite for AnyGraph {
    fn try_write_penazzi<W: Write>(&self, writer: W) -> Result<()> {
        match self {
            AnyGraph::Plain(g) => g.try_write_penazzi(writer),
            AnyGraph::Colored(g) => g.try_write_penazzi(writer),
            AnyGraph::Weighted(g) => g.try_write_penazzi(writer),
            AnyGraph::Digraph(g) => g.try_write_penazzi(writer),
            AnyGraph::WeightedDigraph(g) => g.try_write_penazzi(writer),
            AnyGraph::Network(g) => g.try_write_penazzi(writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::ConnectedGraph;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::io::Cursor;

    fn read<K: GraphKind>(data: &str) -> Result<Graph<K>> {
        Graph::<K>::try_read_penazzi(Cursor::new(data.as_bytes()))
    }

    fn write<K: GraphKind>(graph: &Graph<K>) -> String {
        let mut buffer = Vec::new();
        graph.try_write_penazzi(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn assert_invalid<T: std::fmt::Debug>(result: Result<T>) {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn reads_all_kinds() {
        let plain: Graph<Plain> = read("c comment\n\np edge 3 2\ne 0 1\ne 2 1\n").unwrap();
        assert_eq!(plain.neighbors_of(1).collect_vec(), vec![0, 2]);

        let legacy: Graph<Plain> = read("p edge 2 1 std\ne 1 0\n").unwrap();
        assert!(legacy.has_edge(0, 1));

        let colored: Graph<Colored> = read("p edge 2 1 col\ne 1 0\n").unwrap();
        assert_eq!(colored.colors(), &[0, 0]);

        let digraph: Graph<Digraph> = read("p edge 3 2 d\ne 0 1\ne 2 1\n").unwrap();
        assert!(!digraph.has_edge(1, 0));
        assert_eq!(digraph.in_degree_of(1), 2);

        let weighted: Graph<WeightedDigraph> = read("p edge 3 2 wd\ne 0 1 5\ne 1 2 6\n").unwrap();
        assert_eq!(weighted.edge_weight(1, 2), Some(6));

        let network: Graph<Network> = read("p edge 3 2 f\ne 0 1 2 5\ne 1 2 0 3\n").unwrap();
        assert_eq!(network.edge_weight(0, 1), Some(2));
        assert_eq!(network.edge_capacity(0, 1), Some(5));
        assert_eq!(network.remaining_capacity(1, 2), Some(3));
    }

    #[test]
    fn comment_identifier() {
        let data = "% other comments\np edge 2 1\n% more\ne 0 1\n";
        let graph: Graph<Plain> = PenazziReader::new()
            .comment_identifier("%")
            .try_read_graph(Cursor::new(data.as_bytes()))
            .unwrap();
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn rejects_malformed_files() {
        // missing header, wrong format name, flag mismatch
        assert_invalid(read::<Plain>("c only comments\n"));
        assert_invalid(read::<Plain>("p col 2 1\ne 0 1\n"));
        assert_invalid(read::<Weighted>("p edge 2 1\ne 0 1\n"));
        assert_invalid(read::<Plain>("p edge 2 1 w\ne 0 1 3\n"));

        // edge count mismatch in both directions
        assert_invalid(read::<Plain>("p edge 3 2\ne 0 1\n"));
        assert_invalid(read::<Plain>("p edge 3 1\ne 0 1\ne 1 2\n"));
        assert_invalid(read::<Plain>("p edge 2 4294967295\ne 0 1\n"));
        assert_invalid(read::<Network>("p edge 2 4294967295 f\ne 0 1 0 4\n"));

        // wrong column counts and unparsable values
        assert_invalid(read::<Weighted>("p edge 2 1 w\ne 0 1\n"));
        assert_invalid(read::<Plain>("p edge 2 1\ne 0 1 1\n"));
        assert_invalid(read::<Weighted>("p edge 2 1 w\ne 0 1 x\n"));
        assert_invalid(read::<Plain>("p edge 2 1\nf 0 1\n"));

        // errors of the graph itself
        assert_invalid(read::<Plain>("p edge 2 1\ne 0 2\n"));
        assert_invalid(read::<Plain>("p edge 2 1\ne 1 1\n"));
        assert_invalid(read::<Plain>("p edge 2 2\ne 0 1\ne 1 0\n"));
        assert_invalid(read::<Network>("p edge 2 1 f\ne 0 1 4 3\n"));
    }

    #[test]
    fn reads_any_kind() {
        let g = PenazziReader::new()
            .read_any(Cursor::new(b"p edge 3 2 wd\ne 0 1 5\ne 1 2 6\n".as_slice()))
            .unwrap();
        assert!(g.is_directed());
        assert_eq!(g.flag(), Some("wd"));
        assert_eq!(g.edges(), vec![Edge(0, 1), Edge(1, 2)]);

        let g = AnyGraph::try_read_penazzi(Cursor::new(b"p edge 2 1 std\ne 0 1\n".as_slice()))
            .unwrap();
        assert!(matches!(g, AnyGraph::Plain(_)));

        assert_invalid(
            PenazziReader::new().read_any(Cursor::new(b"p edge 2 1 xyz\ne 0 1\n".as_slice())),
        );
    }

    #[test]
    fn writes_logical_edges_and_record_dumps() {
        let g = Graph::<Weighted>::from_edges(3, [(1, 0, 4), (2, 1, 1)]).unwrap();
        assert_eq!(write(&g), "p edge 3 2 w\ne 0 1 4\ne 1 2 1\n");

        let mut buffer = Vec::new();
        PenazziWriter::new()
            .record_dump(true)
            .try_write_graph(&g, &mut buffer)
            .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "p edge 3 2 w\ne 0 1 4\ne 1 0 4\ne 1 2 1\ne 2 1 1\n"
        );

        let net = Graph::<Network>::from_edges(2, [(0, 1, FlowPayload::new(1, 3).unwrap())]).unwrap();
        assert_eq!(write(&net), "p edge 2 1 f\ne 0 1 1 3\n");
    }

    #[test]
    fn round_trips() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);

        let weighted: Graph<Weighted> = ConnectedGraph::new().nodes(12).edges(30).generate(rng).unwrap();
        assert_eq!(read::<Weighted>(&write(&weighted)).unwrap(), weighted);

        let mut network: Graph<Network> =
            ConnectedGraph::new().nodes(12).edges(30).generate(rng).unwrap();
        crate::algo::GreedyFlow::new(crate::algo::FlowBfs)
            .run(&mut network, 0, 11)
            .unwrap();
        assert_eq!(read::<Network>(&write(&network)).unwrap(), network);

        let plain: Graph<Plain> = ConnectedGraph::new().nodes(12).edges(20).generate(rng).unwrap();
        let any = AnyGraph::from(plain.clone());
        let mut buffer = Vec::new();
        any.try_write_penazzi(&mut buffer).unwrap();
        assert_eq!(
            AnyGraph::try_read_penazzi(Cursor::new(buffer)).unwrap(),
            AnyGraph::Plain(plain)
        );
    }
}
