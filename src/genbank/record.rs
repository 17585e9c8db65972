use serde::{Deserialize, Serialize};
use std::io;

use super::location::Location;
use super::write::write_record;

/// A complete GenBank record: header, feature table and sequence.
///
/// All lists keep the order in which their items appeared in the input.
/// Values are stored as written, without the leading tag columns; field
/// values spanning several lines are joined according to the rules of
/// the respective field (see the [module docs](crate::genbank)).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub locus: String,
    pub definition: String,
    /// Accession numbers, always a list even if there is only one.
    pub accession: Vec<String>,
    pub version: String,
    /// One entry per `DBLINK` line
    pub dblink: Vec<String>,
    pub keywords: String,
    pub source: String,
    /// The first entry is the organism name, the following entries
    /// are the lines of the taxonomic lineage.
    pub organism: Vec<String>,
    /// Free text; lines are separated by `\n`.
    pub comment: String,
    pub contig: String,
    /// Residue letters of the `ORIGIN` block, without numbers and spaces
    pub sequence: String,
    pub references: Vec<Reference>,
    pub features: Vec<Feature>,
}

impl Record {
    /// Returns the first word of the LOCUS line (the locus name)
    pub fn name(&self) -> Option<&str> {
        self.locus.split_ascii_whitespace().next()
    }

    /// Writes the record in the GenBank format.
    #[inline]
    pub fn write<W: io::Write>(&self, writer: W) -> io::Result<()> {
        write_record(writer, self)
    }

    /// Returns the record in the GenBank format as a `String`
    pub fn to_text(&self) -> String {
        let mut out = vec![];
        // writing to a Vec cannot fail
        write_record(&mut out, self).ok();
        // the fields are valid UTF-8 and the writer only splits at character
        // boundaries
        String::from_utf8(out).unwrap_or_default()
    }
}

/// Literature reference of a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    /// 1-based number, assigned in order of appearance
    pub number: u32,
    /// Text after the `REFERENCE` tag, e.g. `1  (bases 1 to 1200)`
    pub origin: String,
    pub authors: String,
    pub consrtm: String,
    pub title: String,
    pub journal: String,
    pub pubmed: String,
    pub remark: String,
}

/// Entry of the feature table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Feature {
    /// Feature key, e.g. `gene` or `CDS`
    pub kind: String,
    pub is_complement: bool,
    pub is_joined: bool,
    pub is_ordered: bool,
    /// Start of the *first* location (not the numeric minimum)
    pub min_position: u64,
    /// Stop of the *last* location (not the numeric maximum)
    pub max_position: u64,
    pub locations: Vec<Location>,
    pub qualifiers: Vec<Qualifier>,
}

impl Feature {
    /// Returns the value of the first qualifier with the given key. The key
    /// may be given with or without the leading '/'. Flag qualifiers have
    /// an empty value.
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        let key = key.trim_start_matches('/');
        self.qualifiers
            .iter()
            .find(|q| q.name() == key)
            .map(|q| q.value.as_deref().unwrap_or(""))
    }
}

/// Key/value annotation of a feature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Qualifier {
    /// Key including the leading '/', e.g. `/gene`
    pub key: String,
    /// Value after the '=' as written, including quotes. `None` for flag
    /// qualifiers such as `/pseudo`, `Some("")` for `/note=`.
    pub value: Option<String>,
}

impl Qualifier {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Qualifier {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Qualifier without value
    pub fn flag<K: Into<String>>(key: K) -> Self {
        Qualifier {
            key: key.into(),
            value: None,
        }
    }

    /// The key without the leading '/'
    #[inline]
    pub fn name(&self) -> &str {
        self.key.trim_start_matches('/')
    }

    /// Returns `true` for qualifiers without value (written without '=')
    #[inline]
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}
