#![allow(dead_code)]

use lazy_static::lazy_static;
use gbff_io::genbank::{Feature, Location, Qualifier, Record, Reference};

/// Two records: the first with references and three features (a gene, a
/// CDS with a joined location on the complementary strand and a feature
/// with a fuzzy single site), the second with a COMMENT spanning five
/// lines.
pub const GBFF: &str = r#"LOCUS       AB000001                 130 bp    DNA     linear   BCT 15-MAR-2021
DEFINITION  Escherichia coli strain K-12 hypothetical operon abcAB, partial
            sequence and flanking regions.
ACCESSION   AB000001 AB000002
VERSION     AB000001.1
DBLINK      BioProject: PRJNA000001
            BioSample: SAMN00000001
KEYWORDS    .
SOURCE      Escherichia coli
  ORGANISM  Escherichia coli
            Bacteria; Pseudomonadota; Gammaproteobacteria; Enterobacterales;
            Enterobacteriaceae; Escherichia.
REFERENCE   1  (bases 1 to 130)
  AUTHORS   Smith,J. and Doe,A.
  TITLE     Direct Submission
  JOURNAL   Submitted (01-JAN-2021) Department of Microbiology, Example
            University, 1 Example Road, Example City 00000, Country
REFERENCE   2  (bases 1 to 70)
  AUTHORS   Doe,A.
  CONSRTM   Example Sequencing Consortium
  TITLE     An operon of unknown function
  JOURNAL   J. Example Biol. 12 (3), 45-67 (2020)
   PUBMED   12345678
  REMARK    Erratum published
FEATURES             Location/Qualifiers
     gene            <1..60
                     /gene="abcA"
                     /locus_tag="ECK_0001"
     CDS             complement(join(10..40,61..96))
                     /gene="abcB"
                     /pseudo
                     /note="hypothetical protein, similar to the ABC
                     transporter permease subunit of other enterobacteria"
                     /codon_start=1
                     /translation="MKVLAAGIVALLLAAGCSSSKEETPAAAPAEQTPAAQPETPAAP
                     QTEAPAAAPAEQTPAAQPET"
     misc_feature    102.>110
                     /note="fuzzy site"
ORIGIN      
        1 gatcctccat atacaacggt atctccacct caggtttaga tctcaacaac ggaaccattg
       61 ccgacatgag acagttaggt atcgtcgaga gttacaagct aaaacgagca gtagtcagct
      121 ctgcatctga
//
LOCUS       AB000003                  70 bp    mRNA    linear   PLN 01-FEB-2022
DEFINITION  Arabidopsis thaliana example protein (EXP1) mRNA, complete cds.
ACCESSION   AB000003
VERSION     AB000003.2
KEYWORDS    .
SOURCE      Arabidopsis thaliana (thale cress)
  ORGANISM  Arabidopsis thaliana
            Eukaryota; Viridiplantae; Streptophyta; Embryophyta; Tracheophyta;
            Spermatophyta; Magnoliopsida; eudicotyledons; Brassicales.
COMMENT     PROVISIONAL REFSEQ: This record has not yet been subject to final
            NCBI review.
            The reference sequence was derived from AB000001.1.
            ##Assembly-Data-START##
            ##Assembly-Data-END##
FEATURES             Location/Qualifiers
     mRNA            join(AB000001.1:100..130,1..40)
                     /gene="EXP1"
                     /product="example protein"
     CDS             order(5..30,35..70)
                     /gene="EXP1"
ORIGIN      
        1 atgaaagtgc tggcggcggg catcgtggcg ctgctgctgg cggcgggctg cagcagcagc
       61 aaagaagaaa
//
"#;

/// Number of generated records
pub const N_RECORDS: usize = 150;

lazy_static! {
    /// Generated records of uneven size
    pub static ref MANY: Vec<Record> = (0..N_RECORDS).map(gen_record).collect();
    pub static ref MANY_TEXT: String = MANY.iter().map(|r| r.to_text()).collect();
}

/// Text of each generated record
pub fn many_texts() -> Vec<String> {
    MANY.iter().map(|r| r.to_text()).collect()
}

/// Generates a record which can be written and parsed again without loss.
/// The number of features and the sequence length vary with `i`, every
/// 20th record is much larger than the others.
pub fn gen_record(i: usize) -> Record {
    let mut seq_len = 50 + (i * 37) % 400;
    let mut n_features = 1 + i % 7;
    if i % 20 == 7 {
        seq_len *= 40;
        n_features *= 30;
    }
    let sequence: String = "acgt".chars().cycle().skip(i % 4).take(seq_len).collect();

    let features = (0..n_features)
        .map(|j| {
            let start = 1 + j as u64 * 5;
            let stop = start + 3 + (i % 5) as u64;
            Feature {
                kind: if j % 2 == 0 { "gene" } else { "CDS" }.to_string(),
                is_complement: (i + j) % 3 == 0,
                is_joined: false,
                is_ordered: false,
                min_position: start,
                max_position: stop,
                locations: vec![Location::range(start, stop)],
                qualifiers: vec![
                    Qualifier::new("/gene", format!("\"g{}_{}\"", i, j)),
                    Qualifier::new(
                        "/note",
                        format!(
                            "\"note {}{}\"",
                            j,
                            " lorem ipsum dolor sit amet".repeat((i + j) % 6)
                        ),
                    ),
                ],
            }
        })
        .collect();

    let references = if i % 3 == 0 {
        vec![
            Reference {
                number: 1,
                origin: format!("1  (bases 1 to {})", seq_len),
                authors: "Doe,J.".to_string(),
                title: "Direct Submission".to_string(),
                journal: "Unpublished".to_string(),
                ..Default::default()
            },
            Reference {
                number: 2,
                origin: "2".to_string(),
                consrtm: "Example Consortium".to_string(),
                journal: "Unpublished".to_string(),
                ..Default::default()
            },
        ]
    } else {
        vec![]
    };

    Record {
        locus: format!("REC{:05} {:>12} bp    DNA     linear   SYN 01-JAN-2020", i, seq_len),
        definition: format!("Synthetic test record number {} with {} features", i, n_features),
        accession: vec![format!("AC{:06}", i)],
        version: format!("AC{:06}.1", i),
        keywords: ".".to_string(),
        source: "synthetic construct".to_string(),
        organism: vec![
            "synthetic construct".to_string(),
            "other sequences; artificial sequences.".to_string(),
        ],
        comment: if i % 4 == 0 {
            "First line.\nSecond line.".to_string()
        } else {
            String::new()
        },
        sequence,
        references,
        features,
        ..Default::default()
    }
}
