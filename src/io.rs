//! Plain-text edge lists.
//!
//! One edge per line as whitespace separated fields, `u v` for plain and directed graphs and
//! `u v w` for weighted ones. A line holding a single id declares an isolated vertex. Blank lines
//! and everything after a `#` are ignored.
//!
//! ```
//! use complexnets::io::{read_graph, write_graph};
//!
//! let text = "# a triangle and a loner\n1 2\n2 3\n3 1\n\n4\n";
//! let graph = read_graph(text.as_bytes()).unwrap();
//! assert_eq!((graph.vertex_count(), graph.edge_count()), (4, 3));
//!
//! let mut out = Vec::new();
//! write_graph(&graph, &mut out).unwrap();
//! let again = read_graph(out.as_slice()).unwrap();
//! assert_eq!((again.vertex_count(), again.edge_count()), (4, 3));
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
    str::FromStr,
};

use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    graph::{DirectedGraph, Graph, VertexId, WeightedGraph},
    property::{PropertySet, PropertyValue},
};

/// A meaningful line of an edge list.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Record {
    Vertex(VertexId),
    Edge(VertexId, VertexId, Option<f64>),
}

fn parse_field<T: FromStr>(field: &str, line: usize, what: &str) -> Result<T> {
    field.parse().map_err(|_| Error::Parse {
        line,
        reason: format!("`{field}` is not a valid {what}"),
    })
}

/// Splits a line into fields, `None` for blank and comment-only lines.
fn fields(text: &str) -> Option<Vec<&str>> {
    let content = text.split('#').next().unwrap_or_default();
    let fields: Vec<&str> = content.split_whitespace().collect();
    (!fields.is_empty()).then_some(fields)
}

fn parse_record(text: &str, line: usize, weighted: bool) -> Result<Option<Record>> {
    let Some(fields) = fields(text) else {
        return Ok(None);
    };

    let record = match (fields.as_slice(), weighted) {
        ([id], _) => Record::Vertex(parse_field(id, line, "vertex id")?),
        ([u, v], false) => Record::Edge(
            parse_field(u, line, "vertex id")?,
            parse_field(v, line, "vertex id")?,
            None,
        ),
        ([u, v, w], true) => Record::Edge(
            parse_field(u, line, "vertex id")?,
            parse_field(v, line, "vertex id")?,
            Some(parse_field(w, line, "weight")?),
        ),
        _ => {
            return Err(Error::Parse {
                line,
                reason: format!(
                    "expected {} fields, found {}",
                    if weighted { "1 or 3" } else { "1 or 2" },
                    fields.len()
                ),
            })
        }
    };

    Ok(Some(record))
}

/// Feeds every record of `reader` to `apply`, with its one-based line number.
fn for_each_record<B, F>(reader: B, weighted: bool, mut apply: F) -> Result<()>
where
    B: BufRead,
    F: FnMut(usize, Record) -> Result<()>,
{
    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        if let Some(record) = parse_record(&text?, line, weighted)? {
            apply(line, record)?;
        }
    }

    Ok(())
}

fn skip_edge(line: usize, u: VertexId, v: VertexId, reason: &str) {
    warn!(line, u, v, reason, "skipping edge");
}

/// Reads an undirected, unweighted edge list.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed lines and [`Error::Io`] if reading fails. Self-loops
/// and repeated edges are skipped with a warning.
#[instrument(level = "debug", skip_all)]
pub fn read_graph<B: BufRead>(reader: B) -> Result<Graph> {
    let mut graph = Graph::new();

    for_each_record(reader, false, |line, record| {
        match record {
            Record::Vertex(id) => {
                graph.insert_vertex(id);
            }
            Record::Edge(u, v, _) if u == v => skip_edge(line, u, v, "self-loop"),
            Record::Edge(u, v, _) if graph.contains_edge(u, v) => {
                skip_edge(line, u, v, "duplicate edge")
            }
            Record::Edge(u, v, _) => graph.insert_edge(u, v)?,
        }
        Ok(())
    })?;

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read graph"
    );

    Ok(graph)
}

/// Reads an undirected edge list with a positive weight on every edge.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed lines or weights that are not positive and finite,
/// and [`Error::Io`] if reading fails. Self-loops and repeated edges are skipped with a warning.
#[instrument(level = "debug", skip_all)]
pub fn read_weighted_graph<B: BufRead>(reader: B) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::new();

    for_each_record(reader, true, |line, record| {
        match record {
            Record::Vertex(id) => {
                graph.insert_vertex(id);
            }
            Record::Edge(u, v, _) if u == v => skip_edge(line, u, v, "self-loop"),
            Record::Edge(u, v, _) if graph.contains_edge(u, v) => {
                skip_edge(line, u, v, "duplicate edge")
            }
            Record::Edge(u, v, weight) => graph
                .insert_edge(u, v, weight.unwrap_or(f64::NAN))
                .map_err(|error| Error::Parse {
                    line,
                    reason: error.to_string(),
                })?,
        }
        Ok(())
    })?;

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read weighted graph"
    );

    Ok(graph)
}

/// Reads a directed edge list, `u v` being the arc from `u` to `v`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed lines and [`Error::Io`] if reading fails. Self-loops
/// and repeated arcs are skipped with a warning.
#[instrument(level = "debug", skip_all)]
pub fn read_directed_graph<B: BufRead>(reader: B) -> Result<DirectedGraph> {
    let mut graph = DirectedGraph::new();

    for_each_record(reader, false, |line, record| {
        match record {
            Record::Vertex(id) => {
                graph.insert_vertex(id);
            }
            Record::Edge(u, v, _) if u == v => skip_edge(line, u, v, "self-loop"),
            Record::Edge(u, v, _) if graph.contains_edge(u, v) => {
                skip_edge(line, u, v, "duplicate arc")
            }
            Record::Edge(u, v, _) => graph.insert_edge(u, v)?,
        }
        Ok(())
    })?;

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read directed graph"
    );

    Ok(graph)
}

/// [`read_graph`] on a file.
///
/// # Errors
///
/// As [`read_graph`], plus [`Error::Io`] if the file can't be opened.
pub fn read_graph_from_path(path: impl AsRef<Path>) -> Result<Graph> {
    read_graph(BufReader::new(File::open(path)?))
}

/// [`read_weighted_graph`] on a file.
///
/// # Errors
///
/// As [`read_weighted_graph`], plus [`Error::Io`] if the file can't be opened.
pub fn read_weighted_graph_from_path(path: impl AsRef<Path>) -> Result<WeightedGraph> {
    read_weighted_graph(BufReader::new(File::open(path)?))
}

/// [`read_directed_graph`] on a file.
///
/// # Errors
///
/// As [`read_directed_graph`], plus [`Error::Io`] if the file can't be opened.
pub fn read_directed_graph_from_path(path: impl AsRef<Path>) -> Result<DirectedGraph> {
    read_directed_graph(BufReader::new(File::open(path)?))
}

/// Writes isolated vertices as single-id lines followed by one `u v` line per edge.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write_graph<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    for vertex in graph.vertices().filter(|vertex| vertex.degree() == 0) {
        writeln!(writer, "{}", vertex.id())?;
    }
    for edge in graph.edges() {
        writeln!(writer, "{} {}", edge.source(), edge.target())?;
    }

    Ok(())
}

/// Like [`write_graph`] with the weight as a third column.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write_weighted_graph<W: Write>(graph: &WeightedGraph, mut writer: W) -> Result<()> {
    for vertex in graph.vertices().filter(|vertex| vertex.degree() == 0) {
        writeln!(writer, "{}", vertex.id())?;
    }
    for (edge, weight) in graph.edges() {
        writeln!(writer, "{} {} {weight}", edge.source(), edge.target())?;
    }

    Ok(())
}

/// Writes isolated vertices as single-id lines followed by one `u v` line per arc.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write_directed_graph<W: Write>(graph: &DirectedGraph, mut writer: W) -> Result<()> {
    for vertex in graph
        .vertices()
        .filter(|vertex| vertex.in_degree() + vertex.out_degree() == 0)
    {
        writeln!(writer, "{}", vertex.id())?;
    }
    for (source, target) in graph.edges() {
        writeln!(writer, "{source} {target}")?;
    }

    Ok(())
}

/// Reads `degree count` lines into a per-vertex degree sequence, `count` copies of `degree`
/// for every line, in file order.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed lines and [`Error::Io`] if reading fails.
pub fn read_degree_sequence<B: BufRead>(reader: B) -> Result<Vec<usize>> {
    let mut degrees = Vec::new();

    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text?;
        let Some(fields) = fields(&text) else {
            continue;
        };

        let [degree, count] = fields.as_slice() else {
            return Err(Error::Parse {
                line,
                reason: format!("expected `degree count`, found {} fields", fields.len()),
            });
        };
        let degree: usize = parse_field(degree, line, "degree")?;
        let count: usize = parse_field(count, line, "count")?;
        degrees.extend(std::iter::repeat(degree).take(count));
    }

    Ok(degrees)
}

/// [`read_degree_sequence`] on a file.
///
/// # Errors
///
/// As [`read_degree_sequence`], plus [`Error::Io`] if the file can't be opened.
pub fn read_degree_sequence_from_path(path: impl AsRef<Path>) -> Result<Vec<usize>> {
    read_degree_sequence(BufReader::new(File::open(path)?))
}

/// Writes a property set as a two-column `key value` table in key order.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn export_property_set<W: Write>(set: &PropertySet, mut writer: W) -> Result<()> {
    for (key, value) in set.iter() {
        match value {
            PropertyValue::Float(value) => writeln!(writer, "{key} {value}")?,
            PropertyValue::Integer(value) => writeln!(writer, "{key} {value}")?,
        }
    }

    Ok(())
}
