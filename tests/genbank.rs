#[macro_use]
extern crate matches;
#[macro_use]
extern crate lazy_static;

mod common;

use common::GBFF;
use gbff_io::genbank::{
    self, write_record_ordered, ErrorKind, Location, MalformedReason, Qualifier, QualifierOrder,
    Reader, Record,
};

fn parse_all(text: &str) -> Vec<genbank::Result<Record>> {
    Reader::new(text.as_bytes()).into_records().collect()
}

fn write_all(records: &[Record]) -> String {
    let mut out = vec![];
    for r in records {
        r.write(&mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}

lazy_static! {
    static ref RECORDS: Vec<Record> = genbank::parse_str(GBFF).unwrap();
}

#[test]
fn round_trip() {
    assert_eq!(RECORDS.len(), 2);
    let written = write_all(&RECORDS);
    assert_eq!(written, GBFF);
    for line in written.lines() {
        assert!(line.len() <= genbank::LINE_WIDTH, "line too long: {}", line);
    }
}

#[test]
fn header() {
    let r = &RECORDS[0];
    assert_eq!(r.name(), Some("AB000001"));
    assert_eq!(
        r.locus,
        "AB000001                 130 bp    DNA     linear   BCT 15-MAR-2021"
    );
    assert_eq!(
        r.definition,
        "Escherichia coli strain K-12 hypothetical operon abcAB, partial sequence and flanking regions."
    );
    assert_eq!(r.accession, vec!["AB000001", "AB000002"]);
    assert_eq!(r.version, "AB000001.1");
    assert_eq!(
        r.dblink,
        vec!["BioProject: PRJNA000001", "BioSample: SAMN00000001"]
    );
    assert_eq!(r.keywords, ".");
    assert_eq!(r.source, "Escherichia coli");
    assert_eq!(r.organism.len(), 3);
    assert_eq!(r.organism[0], "Escherichia coli");
    assert_eq!(r.organism[2], "Enterobacteriaceae; Escherichia.");
    assert!(r.comment.is_empty());
    assert!(r.contig.is_empty());
}

#[test]
fn references() {
    let refs = &RECORDS[0].references;
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].number, 1);
    assert_eq!(refs[1].number, 2);
    assert_eq!(refs[0].origin, "1  (bases 1 to 130)");
    assert_eq!(
        refs[0].journal,
        "Submitted (01-JAN-2021) Department of Microbiology, Example University, 1 Example Road, Example City 00000, Country"
    );
    assert!(refs[0].consrtm.is_empty());
    assert_eq!(refs[1].consrtm, "Example Sequencing Consortium");
    assert_eq!(refs[1].pubmed, "12345678");
    assert_eq!(refs[1].remark, "Erratum published");
    assert!(RECORDS[1].references.is_empty());
}

#[test]
fn reference_numbering() {
    let text = GBFF.replacen(
        "REFERENCE   2  (bases 1 to 70)",
        "REFERENCE   5  (bases 1 to 70)",
        1,
    );
    let records = genbank::parse_str(&text).unwrap();
    let refs = &records[0].references;
    // numbers are assigned in order of appearance
    assert_eq!(refs[1].number, 2);
    assert_eq!(refs[1].origin, "5  (bases 1 to 70)");
}

#[test]
fn fields_before_reference() {
    let text = "\
LOCUS       X1
  AUTHORS   Nobody,N.
REFERENCE   1
  TITLE     A title
            continued
  REMARK    A remark
            not read
FEATURES             Location/Qualifiers
//
";
    let records = genbank::parse_str(text).unwrap();
    let refs = &records[0].references;
    assert_eq!(refs.len(), 1);
    assert!(refs[0].authors.is_empty());
    assert_eq!(refs[0].title, "A title continued");
    assert_eq!(refs[0].remark, "A remark");
}

#[test]
fn accession_continuation() {
    let text = "\
LOCUS       X1
ACCESSION   AB000001 AB000002
            AB000003 REGION: 1..100
FEATURES             Location/Qualifiers
//
";
    let records = genbank::parse_str(text).unwrap();
    assert_eq!(
        records[0].accession,
        vec!["AB000001", "AB000002", "AB000003", "REGION", "1", "100"]
    );
}

#[test]
fn comment() {
    let r = &RECORDS[1];
    assert_eq!(r.comment.lines().count(), 5);
    assert!(r.comment.starts_with("PROVISIONAL REFSEQ: This record"));
    assert!(r.comment.ends_with("\n##Assembly-Data-START##\n##Assembly-Data-END##"));

    let text = r.to_text();
    let start = text.find("COMMENT").unwrap();
    let block: Vec<_> = text[start..].lines().take(5).collect();
    assert_eq!(
        block,
        vec![
            "COMMENT     PROVISIONAL REFSEQ: This record has not yet been subject to final",
            "            NCBI review.",
            "            The reference sequence was derived from AB000001.1.",
            "            ##Assembly-Data-START##",
            "            ##Assembly-Data-END##",
        ]
    );
}

#[test]
fn features() {
    let f = &RECORDS[0].features;
    assert_eq!(f.len(), 3);

    assert_eq!(f[0].kind, "gene");
    assert!(!f[0].is_complement && !f[0].is_joined && !f[0].is_ordered);
    assert_eq!(f[0].locations.len(), 1);
    assert!(f[0].locations[0].unknown_lower_bound);
    assert_eq!((f[0].min_position, f[0].max_position), (1, 60));
    assert_eq!(f[0].qualifier("gene"), Some("\"abcA\""));
    assert_eq!(f[0].qualifier("/locus_tag"), Some("\"ECK_0001\""));

    assert_eq!(f[1].kind, "CDS");
    assert!(f[1].is_complement && f[1].is_joined && !f[1].is_ordered);
    assert_eq!(
        f[1].locations,
        vec![Location::range(10, 40), Location::range(61, 96)]
    );
    assert_eq!((f[1].min_position, f[1].max_position), (10, 96));
    let keys: Vec<_> = f[1].qualifiers.iter().map(|q| q.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["/gene", "/pseudo", "/note", "/codon_start", "/translation"]
    );

    let fuzzy = &f[2].locations[0];
    assert_eq!(f[2].kind, "misc_feature");
    assert_eq!((fuzzy.start, fuzzy.stop), (102, 110));
    assert!(fuzzy.unknown_single_site && fuzzy.unknown_upper_bound);
    assert!(!fuzzy.unknown_lower_bound && !fuzzy.site_between);

    let f = &RECORDS[1].features;
    assert!(f[0].is_joined && !f[0].is_complement);
    assert_eq!(
        f[0].locations[0].external_reference.as_deref(),
        Some("AB000001.1")
    );
    assert_eq!(f[0].locations[1].external_reference, None);
    assert!(f[1].is_ordered && !f[1].is_joined);
}

#[test]
fn flag_qualifier() {
    let cds = &RECORDS[0].features[1];
    let pseudo = &cds.qualifiers[1];
    assert_eq!(pseudo.key, "/pseudo");
    assert!(pseudo.is_flag());
    assert_eq!(pseudo.value, None);
    assert!(GBFF.contains("\n                     /pseudo\n"));
}

#[test]
fn empty_qualifier_value() {
    let text = "\
LOCUS       X1
FEATURES             Location/Qualifiers
     gene            1..1
                     /note=
                     /pseudo
     gene            5..5
                     /gene=\"a\"
     gene            7
                     /gene=\"b\"
//
";
    let rec = genbank::parse_str(text).unwrap().remove(0);
    let gene = &rec.features[0];
    assert_eq!(gene.qualifiers[0].value.as_deref(), Some(""));
    assert!(!gene.qualifiers[0].is_flag());
    assert!(gene.qualifiers[1].is_flag());
    assert_eq!(gene.qualifier("note"), Some(""));

    let written = rec.to_text();
    assert!(written.contains("\n                     /note=\n                     /pseudo\n"));
    assert!(written.contains("\n     gene            1..1\n"));
    assert!(written.contains("\n     gene            5..5\n"));
    assert!(written.contains("\n     gene            7\n"));
    assert_eq!(genbank::parse_str(&written).unwrap().remove(0), rec);
}

#[test]
fn equal_range_ends() {
    let text = GBFF.replacen("<1..60", "60..60", 1);
    let records = genbank::parse_str(&text).unwrap();
    let loc = &records[0].features[0].locations[0];
    assert_eq!((loc.start, loc.stop), (60, 60));
    assert!(!loc.is_point());
    assert_eq!(write_all(&records), text);

    let text = GBFF.replacen("<1..60", "60", 1);
    let records = genbank::parse_str(&text).unwrap();
    assert!(records[0].features[0].locations[0].is_point());
    assert_eq!(write_all(&records), text);
}

#[test]
fn qualifier_continuation() {
    let cds = &RECORDS[0].features[1];
    assert_eq!(
        cds.qualifier("note"),
        Some("\"hypothetical protein, similar to the ABC transporter permease subunit of other enterobacteria\"")
    );
    assert_eq!(
        cds.qualifier("translation"),
        Some("\"MKVLAAGIVALLLAAGCSSSKEETPAAAPAEQTPAAQPETPAAPQTEAPAAAPAEQTPAAQPET\"")
    );
}

#[test]
fn sequence() {
    assert_eq!(RECORDS[0].sequence.len(), 130);
    assert!(RECORDS[0].sequence.starts_with("gatcctccatatacaacggt"));
    assert!(RECORDS[0].sequence.ends_with("ctgcatctga"));
    assert_eq!(RECORDS[1].sequence.len(), 70);
}

#[test]
fn wrap_idempotence() {
    let words = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(6);
    let words = words.trim_end();

    let definitions = vec![
        String::new(),
        "short".to_string(),
        "x".repeat(67),
        "x".repeat(68),
        "x".repeat(200),
        format!("{} {}", "x".repeat(67), "y".repeat(10)),
        format!("short {} words", "x".repeat(150)),
        words.to_string(),
    ];
    for d in definitions {
        let rec = Record {
            locus: "X1".to_string(),
            definition: d,
            organism: vec!["Escherichia coli".to_string()],
            ..Default::default()
        };
        let written = rec.to_text();
        assert!(written.lines().all(|l| l.len() <= 79));
        assert_eq!(genbank::parse_str(&written).unwrap().remove(0), rec);
    }

    // qualifier values, written on one line in the input
    let text = format!(
        "LOCUS       X1\nFEATURES             Location/Qualifiers\n     gene            1..10\n                     /note=\"{}\"\n                     /translation=\"{}\"\n//\n",
        words,
        "MKV".repeat(50)
    );
    let rec = genbank::parse_str(&text).unwrap().remove(0);
    assert_eq!(rec.features[0].qualifier("note").unwrap(), format!("\"{}\"", words));
    let written = rec.to_text();
    assert!(written.lines().filter(|l| l.contains("MKV")).count() > 2);
    let reparsed = genbank::parse_str(&written).unwrap().remove(0);
    assert_eq!(reparsed.features, rec.features);
    assert_eq!(reparsed.to_text(), written);

    // values without spaces are broken at exactly 79 columns
    let text = RECORDS[0].to_text();
    let line = text.lines().find(|l| l.contains("/translation")).unwrap();
    assert_eq!(line.len(), 79);

    // breaks within words in other qualifiers
    for value in &[
        format!("\"{}\"", "COORDINATES:".repeat(8)),
        format!("\"{}/{}\"", "a".repeat(47), "b".repeat(70)),
        format!("\"see {} and {}\"", "y".repeat(90), "z".repeat(60)),
    ] {
        let mut rec = RECORDS[0].clone();
        rec.features[0].qualifiers.push(Qualifier::new("/inference", value.as_str()));
        let written = rec.to_text();
        assert!(written.lines().all(|l| l.len() <= 79));
        let reparsed = genbank::parse_str(&written).unwrap().remove(0);
        assert_eq!(reparsed.features[0].qualifier("inference"), Some(value.as_str()));
        assert_eq!(reparsed, rec);
    }
}

#[test]
fn long_locus() {
    let locus = "NZ_ABCDEFGH01000001     1234567 bp    DNA     linear   CON 01-JAN-2020";
    let version = format!("{} {}", "NZ_ABCDEFGH01000001.1", "x".repeat(70));
    let text = GBFF
        .replacen(
            "AB000001                 130 bp    DNA     linear   BCT 15-MAR-2021",
            locus,
            1,
        )
        .replacen("VERSION     AB000001.1", &format!("VERSION     {}", version), 1);
    let records = genbank::parse_str(&text).unwrap();
    assert_eq!(records[0].locus, locus);
    assert_eq!(records[0].version, version);
    let written = write_all(&records);
    assert_eq!(written, text);
    assert!(written.lines().next().unwrap().len() > 79);
}

#[test]
fn location_wrap() {
    let expr: Vec<_> = (0..30)
        .map(|i| format!("{}..{}", i * 100 + 1, i * 100 + 50))
        .collect();
    let text = format!(
        "LOCUS       X1\nFEATURES             Location/Qualifiers\n     CDS             complement(join({}))\n                     /gene=\"a\"\n//\n",
        expr.join(",")
    );
    let rec = genbank::parse_str(&text).unwrap().remove(0);
    let f = &rec.features[0];
    assert_eq!(f.locations.len(), 30);
    assert_eq!((f.min_position, f.max_position), (1, 2950));

    let written = rec.to_text();
    let loc_lines: Vec<_> = written
        .lines()
        .skip_while(|l| !l.starts_with("     CDS"))
        .take_while(|l| !l.contains('/'))
        .collect();
    assert!(loc_lines.len() > 1);
    for line in &loc_lines {
        assert!(line.len() <= 79);
    }
    assert!(loc_lines[0].ends_with(','));
    assert!(loc_lines[1].starts_with("                     "));
    assert_eq!(genbank::parse_str(&written).unwrap().remove(0), rec);
}

#[test]
fn contig() {
    let contig = format!(
        "join({})",
        (1..15)
            .map(|i| format!("AAAA010000{:02}.1:1..50000", i))
            .collect::<Vec<_>>()
            .join(",gap(100),")
    );
    let text = format!(
        "LOCUS       X1\nFEATURES             Location/Qualifiers\n     source          1..10\n                     /mol_type=\"genomic DNA\"\nCONTIG      {}\n//\n",
        contig
    );
    let rec = genbank::parse_str(&text).unwrap().remove(0);
    assert_eq!(rec.contig, contig);
    let written = rec.to_text();
    assert!(written.lines().all(|l| l.len() <= 79));
    assert!(written.contains("\nCONTIG      join(AAAA01000001.1:1..50000,"));
    assert_eq!(genbank::parse_str(&written).unwrap().remove(0), rec);
}

#[test]
fn location_arity() {
    let text = GBFF.replacen("order(5..30,35..70)", "order(5..30,35..70..80)", 1);
    let results = parse_all(&text);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    let line = text.lines().position(|l| l.contains("order(")).unwrap() as u64;
    match err.kind() {
        ErrorKind::LocationGrammar {
            pos,
            location,
            found,
        } => {
            assert_eq!(*found, 3);
            assert_eq!(location, "35..70..80)");
            assert_eq!(pos.record(), 1);
            assert_eq!(pos.line(), line);
            assert_eq!(pos.locus(), Some("AB000003"));
        }
        _ => panic!("wrong error: {:?}", err),
    }
    assert!(!err.kind().is_fatal());
    assert!(err.to_string().starts_with("GenBank parse error:"));

    let text = GBFF.replacen("102.>110", "join(", 1);
    let results = parse_all(&text);
    assert_matches!(
        results[0].as_ref().unwrap_err().kind(),
        ErrorKind::LocationGrammar { found: 0, .. }
    );
    assert!(results[1].is_ok());
}

#[test]
fn unterminated_location() {
    let text = GBFF.replacen(
        "     CDS             order(5..30,35..70)\n                     /gene=\"EXP1\"\n",
        "     CDS             order(5..30,35..70)\n",
        1,
    );
    let results = parse_all(&text);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::UnterminatedLocation { feature, .. } if feature == "CDS"
    );
}

#[test]
fn malformed_records() {
    let no_features = "LOCUS       X1\nDEFINITION  Nothing.\n//\n";
    let origin_first = "LOCUS       X2\nORIGIN      \nFEATURES             Location/Qualifiers\n//\n";
    let text = format!("{}{}{}", no_features, origin_first, GBFF);
    let results = parse_all(&text);
    assert_eq!(results.len(), 4);
    assert_matches!(
        results[0].as_ref().unwrap_err().kind(),
        ErrorKind::MalformedRecord { reason: MalformedReason::MissingFeatures, .. }
    );
    let err = results[1].as_ref().unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::MalformedRecord { reason: MalformedReason::ContradictoryRanges, .. }
    );
    assert_eq!(err.position().unwrap().record(), 1);
    assert_eq!(err.position().unwrap().line(), 2);
    assert_eq!(err.position().unwrap().locus(), Some("X2"));
    assert_eq!(results[2].as_ref().unwrap(), &RECORDS[0]);
    assert_eq!(results[3].as_ref().unwrap(), &RECORDS[1]);
}

#[test]
fn unterminated_record() {
    let text = &GBFF[..GBFF.len() - 3];
    let results = parse_all(text);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_matches!(
        results[1].as_ref().unwrap_err().kind(),
        ErrorKind::MalformedRecord { reason: MalformedReason::Unterminated, .. }
    );

    // blank lines after the last record are not a record
    let text = format!("{}\n\n  \n", GBFF);
    assert_eq!(parse_all(&text).len(), 2);
}

#[test]
fn line_endings() {
    let crlf = GBFF.replace('\n', "\r\n");
    let records = genbank::parse_str(&crlf).unwrap();
    assert_eq!(records, *RECORDS);
    // written with LF
    assert_eq!(write_all(&records), GBFF);
}

#[test]
fn buffer_capacity() {
    for cap in 3..100 {
        let mut reader = Reader::with_capacity(GBFF.as_bytes(), cap);
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records, *RECORDS, "buffer capacity {}", cap);
    }
}

#[test]
fn empty_input() {
    assert!(Reader::new(&b""[..]).next().is_none());
    assert!(Reader::new(&b"\n\n"[..]).next().is_none());
    assert!(genbank::parse_str("").unwrap().is_empty());
}

#[test]
fn invalid_utf8() {
    let mut data = GBFF.as_bytes().to_vec();
    let pos = GBFF.find("Arabidopsis").unwrap();
    data[pos] = 0xff;
    let mut reader = Reader::new(&data[..]);
    assert!(reader.next().unwrap().is_ok());
    let err = reader.next().unwrap().unwrap_err();
    assert!(err.kind().is_fatal());
    assert_matches!(err.kind(), ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::InvalidData);
    assert!(reader.next().is_none());
}

#[test]
fn raw_records() {
    let mut reader = Reader::new(GBFF.as_bytes());
    let first = reader.next_raw().unwrap().unwrap();
    let second = reader.next_raw().unwrap().unwrap();
    assert!(reader.next_raw().is_none());
    assert_eq!((first.index(), second.index()), (0, 1));
    assert_eq!(first.first_line(), 0);
    assert_eq!(second.lines()[0], "//");
    assert_eq!(second.locus(), Some("AB000003"));
    assert_eq!(second.parse().unwrap(), RECORDS[1]);
    assert_eq!(reader.num_records(), 2);
}

#[test]
fn qualifier_order() {
    let order: QualifierOrder =
        serde_json::from_str(r#"{"CDS": ["/translation", "gene"], "misc_feature": []}"#).unwrap();
    assert_eq!(order.rank("CDS", "/gene"), Some(1));
    assert_eq!(order.rank("CDS", "note"), None);
    assert_eq!(order.rank("gene", "gene"), None);

    let mut out = vec![];
    write_record_ordered(&mut out, &RECORDS[0], Some(&order)).unwrap();
    let text = String::from_utf8(out).unwrap();
    let keys: Vec<_> = text
        .lines()
        .skip_while(|l| !l.starts_with("     CDS"))
        .skip(1)
        .take_while(|l| l.starts_with("                     "))
        .filter_map(|l| l.trim_start().strip_prefix('/'))
        .map(|l| l.split('=').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["translation", "gene", "pseudo", "note", "codon_start"]);

    // other features unchanged
    let rec = genbank::parse_str(&text).unwrap().remove(0);
    assert_eq!(rec.features[0], RECORDS[0].features[0]);
    assert_eq!(rec.features[2], RECORDS[0].features[2]);

    // an empty table does not change anything
    let mut out = vec![];
    write_record_ordered(&mut out, &RECORDS[0], Some(&QualifierOrder::new())).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), RECORDS[0].to_text());
}

#[test]
fn serde() {
    let json = serde_json::to_string(&RECORDS[1]).unwrap();
    let rec: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(rec, RECORDS[1]);
}
