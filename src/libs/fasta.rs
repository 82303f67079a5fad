//! Protein FASTA serialization, ordered by the gene index embedded in each
//! transcript identifier.

use anyhow::Context;
use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;

/// Residues per body line.
pub const SEQ_LINE_WIDTH: usize = 60;

lazy_static! {
    static ref RE_GENE_INDEX: Regex = Regex::new(r"g(\d+)\.t\d+$").unwrap();
}

/// The integer sort key from an identifier shaped like `ctg1.g12.t1`.
pub fn gene_index(id: &str) -> anyhow::Result<u64> {
    let caps = RE_GENE_INDEX
        .captures(id)
        .with_context(|| format!("transcript identifier lacks a gene index: {}", id))?;

    caps[1]
        .parse()
        .with_context(|| format!("gene index out of range: {}", id))
}

/// Writes one wrapped FASTA entry. An empty sequence emits the header alone.
pub fn write_wrapped<W: Write>(writer: &mut W, id: &str, seq: &str) -> anyhow::Result<()> {
    writeln!(writer, ">{}", id)?;
    for chunk in seq.as_bytes().chunks(SEQ_LINE_WIDTH) {
        writer.write_all(chunk)?;
        writeln!(writer)?;
    }

    Ok(())
}

/// Serializes the accumulated sequences, ascending by gene index. An
/// identifier without a gene index is fatal; no entry is silently dropped.
pub fn write_proteins<W: Write>(
    writer: &mut W,
    seq_of: &IndexMap<String, String>,
) -> anyhow::Result<()> {
    let keyed: Vec<(u64, &String, &String)> = seq_of
        .iter()
        .map(|(id, seq)| gene_index(id).map(|key| (key, id, seq)))
        .collect::<anyhow::Result<_>>()?;

    for (_, id, seq) in keyed.into_iter().sorted_by_key(|entry| entry.0) {
        write_wrapped(writer, id, seq)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gene_index_parses_suffix() {
        assert_eq!(gene_index("ctg1.g1.t1").unwrap(), 1);
        assert_eq!(gene_index("ctg1.g12.t3").unwrap(), 12);
        assert_eq!(gene_index("scaffold_7.g205.t1").unwrap(), 205);
    }

    #[test]
    fn gene_index_rejects_malformed() {
        assert!(gene_index("ctg1.gene1").is_err());
        assert!(gene_index("ctg1.g1.t1.cds").is_err());
        assert!(gene_index("").is_err());
    }

    #[test]
    fn wrap_roundtrip_at_60() {
        let seq = "ACDEFGHIKLMNPQRSTVWY".repeat(4);
        let mut out = Vec::new();
        write_wrapped(&mut out, "ctg1.g1.t1", &seq).unwrap();

        let text = String::from_utf8(out).unwrap();
        let body: Vec<&str> = text.lines().skip(1).collect();

        assert_eq!(body.len(), 2);
        assert_eq!(body[0].len(), 60);
        assert_eq!(body[1].len(), 20);
        assert_eq!(body.concat(), seq);
    }

    #[test]
    fn empty_sequence_emits_header_only() {
        let mut out = Vec::new();
        write_wrapped(&mut out, "ctg1.g1.t1", "").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), ">ctg1.g1.t1\n");
    }

    #[test]
    fn sort_is_numeric_not_lexicographic() {
        let mut seq_of = IndexMap::new();
        seq_of.insert("foo.g2.t1".to_string(), "BB".to_string());
        seq_of.insert("foo.g10.t1".to_string(), "CC".to_string());
        seq_of.insert("foo.g1.t1".to_string(), "AA".to_string());

        let mut out = Vec::new();
        write_proteins(&mut out, &seq_of).unwrap();

        let text = String::from_utf8(out).unwrap();
        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('>')).collect();

        assert_eq!(headers, vec![">foo.g1.t1", ">foo.g2.t1", ">foo.g10.t1"]);
    }

    #[test]
    fn malformed_identifier_is_fatal() {
        let mut seq_of = IndexMap::new();
        seq_of.insert("foo.g1.t1".to_string(), "AA".to_string());
        seq_of.insert("not-a-transcript".to_string(), "BB".to_string());

        let mut out = Vec::new();
        assert!(write_proteins(&mut out, &seq_of).is_err());
    }
}
