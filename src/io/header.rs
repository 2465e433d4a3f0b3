//! # Headers
//!
//! The header line `p edge {n} {m} [flag]` declares the number of vertices, the number of
//! (logical) edges and, through the optional flag, the kind of graph that follows.
//! The flag `std` is accepted as an alias for no flag.

use smallvec::SmallVec;

use super::*;

/// Flag written by older files for plain graphs
pub const LEGACY_PLAIN_FLAG: &str = "std";

/// A parsed `p edge` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub number_of_nodes: NumNodes,
    pub number_of_edges: NumEdges,
    /// Kind flag, `None` for plain graphs
    pub flag: Option<String>,
}

impl Header {
    pub fn new(number_of_nodes: NumNodes, number_of_edges: NumEdges, flag: Option<&str>) -> Self {
        Self {
            number_of_nodes,
            number_of_edges,
            flag: flag.map(str::to_string),
        }
    }

    /// Header describing `graph`
    pub fn of_graph<K: GraphKind>(graph: &Graph<K>) -> Self {
        Self::new(graph.number_of_nodes(), graph.number_of_edges(), K::FLAG)
    }

    /// Returns *true* if the flag selects the kind `K`
    pub fn matches_kind<K: GraphKind>(&self) -> bool {
        K::accepts_flag(self.flag.as_deref())
    }

    /// Tries to parse `p edge {n} {m} [flag]`
    ///
    /// ```
    /// use flowgraphs::io::Header;
    ///
    /// let header = Header::parse("p edge 4 3 wd").unwrap();
    /// assert_eq!(header, Header::new(4, 3, Some("wd")));
    ///
    /// assert_eq!(Header::parse("p edge 4 3 std").unwrap().flag, None);
    /// assert!(Header::parse("p col 4 3").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: SmallVec<[&str; 5]> = line.split_whitespace().collect();
        raise_error_unless!(
            (4..=5).contains(&tokens.len()),
            ErrorKind::InvalidData,
            format!("Header {line:?} must have 4 or 5 tokens")
        );
        raise_error_unless!(
            tokens[0] == "p" && tokens[1] == "edge",
            ErrorKind::InvalidData,
            format!("Invalid header {line:?}, expected `p edge`")
        );

        let mut numbers = tokens[2..4].iter();
        let number_of_nodes = parse_next_value!(numbers, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(numbers, "Header>Number of edges");

        let flag = tokens
            .get(4)
            .copied()
            .filter(|&flag| flag != LEGACY_PLAIN_FLAG);

        Ok(Self::new(number_of_nodes, number_of_edges, flag))
    }

    /// Writes `p edge {n} {m}` followed by the flag if present
    pub fn write_header<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(
            writer,
            "p edge {} {}",
            self.number_of_nodes, self.number_of_edges
        )?;
        if let Some(flag) = &self.flag {
            write!(writer, " {flag}")?;
        }
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        assert_eq!(Header::parse("p edge 3 2").unwrap(), Header::new(3, 2, None));
        assert_eq!(
            Header::parse("p  edge 3\t2   f").unwrap(),
            Header::new(3, 2, Some("f"))
        );

        let header = Header::parse("p edge 3 2 std").unwrap();
        assert!(header.matches_kind::<Plain>());
        assert!(!header.matches_kind::<Weighted>());
        assert!(Header::parse("p edge 3 2 col").unwrap().matches_kind::<Colored>());
    }

    #[test]
    fn rejects_malformed_headers() {
        for line in [
            "",
            "p edge 3",
            "p edge 3 2 w extra",
            "q edge 3 2",
            "p graph 3 2",
            "p edge -3 2",
            "p edge 3 two",
        ] {
            let err = Header::parse(line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "{line:?}");
        }
    }

    #[test]
    fn writes_flags() {
        let mut out = Vec::new();
        Header::new(5, 4, Some("wd")).write_header(&mut out).unwrap();
        Header::new(2, 1, None).write_header(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "p edge 5 4 wd\np edge 2 1\n");
    }
}
