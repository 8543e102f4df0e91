// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader.
//!
//! Reads the line oriented, comma separated railyard format into a validated
//! `Instance`:
//!
//! ```raw
//! stationCount,edgeCount,laneCount,capacity
//! stationId,pickerCount                        (stationCount lines)
//! edgeId,stationIdA,stationIdB                 (edgeCount lines)
//! goodCount
//! goodId,originId,destinationId,weight,null    (goodCount lines)
//! goodId,originId,destinationId,weight,W1,W2   (with waypoints)
//! ```
//!
//! Fields are trimmed, blank lines are skipped and, by default, everything
//! after a `#` is treated as a comment. The loader fails fast: ids that
//! reference unknown stations, duplicate ids, wrong field counts and
//! inadmissible numbers all produce an `InstanceLoaderError` that names the
//! 1-based line it was found on. Nothing is ever replaced by a default.

use crate::{
    good::Good,
    index::StationIndex,
    instance::Instance,
    network::{Network, NetworkBuilder, NetworkError},
};
use railyard_core::num::weight::Weight;
use rustc_hash::FxHashSet;
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input ended before the named section was complete.
    UnexpectedEof { expected: &'static str },
    /// A line has the wrong number of fields.
    MalformedLine {
        line: usize,
        expected: &'static str,
        found: usize,
    },
    /// A token could not be parsed into the expected type.
    Parse { line: usize, error: ParseTokenError },
    /// The lane count is zero.
    InvalidDimensions,
    /// The lane capacity is negative or not finite.
    InvalidCapacity,
    /// A good weight is negative or not finite.
    InvalidWeight { line: usize },
    /// A station or edge declaration is structurally invalid.
    Network { line: usize, error: NetworkError },
    /// A good references a station that was never declared.
    UnknownStation { line: usize, id: String },
    /// A good id was declared twice.
    DuplicateGood { line: usize, id: String },
    /// Non-empty input follows the last declared good.
    TrailingInput { line: usize },
}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { expected } => {
                write!(f, "Unexpected end of input while reading {}", expected)
            }
            Self::MalformedLine {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {}: expected {}, found {} field(s)",
                line, expected, found
            ),
            Self::Parse { line, error } => write!(f, "Line {}: parse error: {}", line, error),
            Self::InvalidDimensions => write!(f, "The lane count must be a positive integer"),
            Self::InvalidCapacity => {
                write!(f, "The lane capacity must be finite and not negative")
            }
            Self::InvalidWeight { line } => write!(
                f,
                "Line {}: good weight must be finite and not negative",
                line
            ),
            Self::Network { line, error } => write!(f, "Line {}: {}", line, error),
            Self::UnknownStation { line, id } => {
                write!(f, "Line {}: unknown station '{}'", line, id)
            }
            Self::DuplicateGood { line, id } => {
                write!(f, "Line {}: good '{}' is declared twice", line, id)
            }
            Self::TrailingInput { line } => {
                write!(f, "Line {}: unexpected input after the last good", line)
            }
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse { error, .. } => Some(error),
            Self::Network { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A configurable loader for railyard instances.
///
/// # Configuration
/// * `comment_prefix`: Text after this character is ignored. `None` disables comments.
/// * `allow_trailing_input`: If false (the default), any non-empty line after the
///   declared goods is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader<W> {
    comment_prefix: Option<char>,
    allow_trailing_input: bool,
    _marker: std::marker::PhantomData<fn() -> W>,
}

impl<W> Default for InstanceLoader<W> {
    fn default() -> Self {
        Self {
            comment_prefix: Some('#'),
            allow_trailing_input: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<W> InstanceLoader<W>
where
    W: Weight,
{
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comment character, or disables comments with `None`.
    #[inline]
    pub fn comment_prefix(mut self, prefix: Option<char>) -> Self {
        self.comment_prefix = prefix;
        self
    }

    /// Configures whether input after the last good is tolerated.
    #[inline]
    pub fn allow_trailing_input(mut self, yes: bool) -> Self {
        self.allow_trailing_input = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance<W>, InstanceLoaderError> {
        let mut lines = LineReader::new(rdr, self.comment_prefix);

        // Header
        let (line, header) = lines.next_fields("the header line")?;
        expect_fields(line, &header, 4, "4 header fields")?;
        let num_stations: usize = parse_field(line, &header[0])?;
        let num_edges: usize = parse_field(line, &header[1])?;
        let num_lanes: usize = parse_field(line, &header[2])?;
        let capacity: W = parse_field(line, &header[3])?;

        if num_lanes == 0 {
            return Err(InstanceLoaderError::InvalidDimensions);
        }
        if !capacity.is_admissible() {
            return Err(InstanceLoaderError::InvalidCapacity);
        }

        let mut builder = NetworkBuilder::preallocated(num_lanes, capacity, num_stations, num_edges);

        // Stations
        for _ in 0..num_stations {
            let (line, fields) = lines.next_fields("a station line")?;
            expect_fields(line, &fields, 2, "2 station fields")?;
            let pickers: u32 = parse_field(line, &fields[1])?;
            builder
                .add_station(fields[0].as_str(), pickers)
                .map_err(|error| InstanceLoaderError::Network { line, error })?;
        }

        // Edges
        for _ in 0..num_edges {
            let (line, fields) = lines.next_fields("an edge line")?;
            expect_fields(line, &fields, 3, "3 edge fields")?;
            builder
                .add_edge(fields[0].as_str(), &fields[1], &fields[2])
                .map_err(|error| InstanceLoaderError::Network { line, error })?;
        }

        let network = builder.build();

        // Goods
        let (line, count) = lines.next_fields("the good count")?;
        expect_fields(line, &count, 1, "1 good count field")?;
        let num_goods: usize = parse_field(line, &count[0])?;

        let mut goods = Vec::with_capacity(num_goods);
        let mut good_ids = FxHashSet::default();
        for _ in 0..num_goods {
            let (line, fields) = lines.next_fields("a good line")?;
            let good = read_good(&network, line, fields)?;
            if !good_ids.insert(good.id().to_owned()) {
                return Err(InstanceLoaderError::DuplicateGood {
                    line,
                    id: good.id().to_owned(),
                });
            }
            goods.push(good);
        }

        if !self.allow_trailing_input {
            if let Some((line, _)) = lines.next_non_empty()? {
                return Err(InstanceLoaderError::TrailingInput { line });
            }
        }

        Ok(Instance::new(network, goods))
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance<W>, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance<W>, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance<W>, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn read_good<W>(
    network: &Network<W>,
    line: usize,
    mut fields: Vec<String>,
) -> Result<Good<W>, InstanceLoaderError>
where
    W: Weight,
{
    if fields.len() < 4 {
        return Err(InstanceLoaderError::MalformedLine {
            line,
            expected: "at least 4 good fields",
            found: fields.len(),
        });
    }

    let resolve = |id: &str| -> Result<StationIndex, InstanceLoaderError> {
        network
            .station_by_id(id)
            .ok_or_else(|| InstanceLoaderError::UnknownStation {
                line,
                id: id.to_owned(),
            })
    };

    let origin = resolve(fields[1].as_str())?;
    let destination = resolve(fields[2].as_str())?;
    let weight: W = parse_field(line, &fields[3])?;
    if !weight.is_admissible() {
        return Err(InstanceLoaderError::InvalidWeight { line });
    }

    let waypoint_fields = &fields[4..];
    let waypoints = if waypoint_fields.is_empty()
        || (waypoint_fields.len() == 1 && waypoint_fields[0] == "null")
    {
        Vec::new()
    } else {
        waypoint_fields
            .iter()
            .map(|id| resolve(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?
    };

    let id = std::mem::take(&mut fields[0]);
    Ok(Good::new(id, origin, destination, weight).with_waypoints(waypoints))
}

#[inline]
fn expect_fields(
    line: usize,
    fields: &[String],
    count: usize,
    expected: &'static str,
) -> Result<(), InstanceLoaderError> {
    if fields.len() != count {
        return Err(InstanceLoaderError::MalformedLine {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

#[inline]
fn parse_field<T>(line: usize, token: &str) -> Result<T, InstanceLoaderError>
where
    T: FromStr,
{
    token.parse::<T>().map_err(|_| InstanceLoaderError::Parse {
        line,
        error: ParseTokenError {
            token: token.to_owned(),
            type_name: std::any::type_name::<T>(),
        },
    })
}

/// Reads significant lines and splits them into trimmed fields.
struct LineReader<R> {
    rdr: R,
    buf: String,
    line: usize,
    comment_prefix: Option<char>,
}

impl<R: BufRead> LineReader<R> {
    #[inline]
    fn new(rdr: R, comment_prefix: Option<char>) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
            comment_prefix,
        }
    }

    /// Returns the next line with content, stripped of comments and
    /// surrounding whitespace, or `None` at the end of input.
    fn next_non_empty(&mut self) -> Result<Option<(usize, &str)>, InstanceLoaderError> {
        loop {
            self.buf.clear();
            let n = self.rdr.read_line(&mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            let content = match self.comment_prefix {
                Some(prefix) => self.buf.split(prefix).next().unwrap_or(""),
                None => self.buf.as_str(),
            };
            if !content.trim().is_empty() {
                break;
            }
        }

        let content = match self.comment_prefix {
            Some(prefix) => self.buf.split(prefix).next().unwrap_or(""),
            None => self.buf.as_str(),
        };
        Ok(Some((self.line, content.trim())))
    }

    /// Returns the fields of the next significant line, or `UnexpectedEof`
    /// naming what was `expected`.
    fn next_fields(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, Vec<String>), InstanceLoaderError> {
        match self.next_non_empty()? {
            Some((line, content)) => Ok((
                line,
                content.split(',').map(|f| f.trim().to_owned()).collect(),
            )),
            None => Err(InstanceLoaderError::UnexpectedEof { expected }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::GoodIndex;

    const SMALL_INSTANCE: &str = "\
3,2,2,10.5      # stations, edges, lanes, capacity
A,5
B,0
C,2

E1,A,B
E2,B,C
3
G1,A,C,4.25,null
G2,C,A,1
G3,A,B,2,C,B
";

    fn load(s: &str) -> Result<Instance<f64>, InstanceLoaderError> {
        InstanceLoader::new().from_str(s)
    }

    #[test]
    fn test_loads_and_maps_correctly() {
        let instance = load(SMALL_INSTANCE).expect("Failed to load");
        let network = instance.network();

        assert_eq!(network.num_stations(), 3);
        assert_eq!(network.num_edges(), 2);
        assert_eq!(network.num_lanes(), 2);
        assert_eq!(network.lane_capacity(), 10.5);
        assert_eq!(network.station(StationIndex::new(1)).pickers(), 0);

        let b = network.station_by_id("B").unwrap();
        let c = network.station_by_id("C").unwrap();
        assert_eq!(network.edge_between(b, c), network.edge_by_id("E2"));

        assert_eq!(instance.num_goods(), 3);
        let g1 = instance.good(GoodIndex::new(0));
        assert_eq!(g1.id(), "G1");
        assert_eq!(g1.weight(), 4.25);
        assert!(!g1.has_waypoints());

        // Four fields: no waypoints either.
        assert!(!instance.good(GoodIndex::new(1)).has_waypoints());

        let g3 = instance.good(GoodIndex::new(2));
        assert_eq!(g3.waypoints(), &[c, b]);
    }

    #[test]
    fn test_whitespace_and_crlf_are_tolerated() {
        let data = "1,0,1,3\r\n A , 2 \r\n1\r\nG,A,A,1,null\r\n";
        let instance = load(data).unwrap();
        assert_eq!(instance.network().station(StationIndex::new(0)).id(), "A");
        assert!(instance.good(GoodIndex::new(0)).is_trivial());
    }

    #[test]
    fn test_comments_can_be_disabled() {
        let data = "1,0,1,3\nA#1,2\n0\n";
        let instance: Instance<f64> = InstanceLoader::new()
            .comment_prefix(None)
            .from_str(data)
            .unwrap();
        assert_eq!(instance.network().station(StationIndex::new(0)).id(), "A#1");

        // With comments enabled the same line loses its picker field.
        match load(data) {
            Err(InstanceLoaderError::MalformedLine { line: 2, found: 1, .. }) => {}
            other => panic!("Expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_station_in_edge() {
        let data = "1,1,1,3\nA,1\nE,A,Z\n0\n";
        match load(data) {
            Err(InstanceLoaderError::Network {
                line: 3,
                error: NetworkError::UnknownStation { id },
            }) => assert_eq!(id, "Z"),
            other => panic!("Expected UnknownStation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_station_in_good_and_waypoint() {
        let data = "1,0,1,3\nA,1\n1\nG,A,Q,1,null\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::UnknownStation { line: 4, ref id }) if id == "Q"
        ));

        let data = "1,0,1,3\nA,1\n1\nG,A,A,1,null,A\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::UnknownStation { line: 4, ref id }) if id == "null"
        ));
    }

    #[test]
    fn test_duplicate_ids() {
        let data = "2,0,1,3\nA,1\nA,2\n0\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::Network {
                line: 3,
                error: NetworkError::DuplicateStation { .. }
            })
        ));

        let data = "1,0,1,3\nA,1\n2\nG,A,A,1\nG,A,A,2\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::DuplicateGood { line: 5, .. })
        ));
    }

    #[test]
    fn test_parse_error_structure() {
        let data = "2,garbage,1,3\n";
        match load(data) {
            Err(InstanceLoaderError::Parse { line, error }) => {
                assert_eq!(line, 1);
                assert_eq!(error.token, "garbage");
                assert!(error.type_name.contains("usize"));
            }
            other => panic!("Expected Parse error with context, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            load("0,0,0,3\n0\n"),
            Err(InstanceLoaderError::InvalidDimensions)
        ));
        assert!(matches!(
            load("0,0,1,-3\n0\n"),
            Err(InstanceLoaderError::InvalidCapacity)
        ));
        assert!(matches!(
            load("1,0,1,3\nA,1\n1\nG,A,A,NaN\n"),
            Err(InstanceLoaderError::InvalidWeight { line: 4 })
        ));
        assert!(matches!(
            load("1,0,1,3\nA,-1\n0\n"),
            Err(InstanceLoaderError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_unexpected_eof_names_section() {
        match load("2,1,1,3\nA,1\n") {
            Err(InstanceLoaderError::UnexpectedEof { expected }) => {
                assert_eq!(expected, "a station line")
            }
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_input() {
        let data = "1,0,1,3\nA,1\n0\nextra\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::TrailingInput { line: 4 })
        ));

        let instance: Instance<f64> = InstanceLoader::new()
            .allow_trailing_input(true)
            .from_str(data)
            .unwrap();
        assert_eq!(instance.num_goods(), 0);

        // Trailing blank lines and comments are fine.
        assert!(load("1,0,1,3\nA,1\n0\n\n   # done\n").is_ok());
    }

    #[test]
    fn test_good_with_too_few_fields() {
        let data = "1,0,1,3\nA,1\n1\nG,A,A\n";
        assert!(matches!(
            load(data),
            Err(InstanceLoaderError::MalformedLine { line: 4, found: 3, .. })
        ));
    }

    #[test]
    fn test_error_display_mentions_line() {
        let err = load("1,0,1,3\nA,1\n1\nG,A,Q,1\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 4: unknown station 'Q'");
    }
}
