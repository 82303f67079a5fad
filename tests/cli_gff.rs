use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_gff_prot_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("anno")?;
    let output = cmd.arg("gff").arg("prot").arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Extract protein sequences from AUGUSTUS GFF3"));
    Ok(())
}

#[test]
fn command_gff_prot() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("anno")?;
    let output = cmd
        .arg("gff")
        .arg("prot")
        .arg("tests/gff/augustus.gff3")
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let expected = "\
>ctg1.g1.t1
MSEKQRSTACDEFGHIKLMNPQRSTVWYACDEFGHIKLMNPQRSTVWYACDEFGHIKLMN
PQRSTVWYACDEFGHIKLMNPQRSTVWY
>ctg1.g2.t1
MSE
>ctg2.g10.t1
MKTAYIAKQRQISFVKSHFSRQLEERLGLI
";
    assert_eq!(stdout, expected);

    Ok(())
}

#[test]
fn command_gff_prot_outfile() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let outfile = tempdir.path().join("augustus.faa");

    let mut cmd = Command::cargo_bin("anno")?;
    let output = cmd
        .arg("gff")
        .arg("prot")
        .arg("tests/gff/augustus.gff3")
        .arg("-o")
        .arg(outfile.to_str().unwrap())
        .output()?;
    assert!(output.status.success());

    let content = std::fs::read_to_string(&outfile)?;
    assert_eq!(content.lines().filter(|l| l.starts_with('>')).count(), 3);
    // wrapped at 60 columns
    assert!(content.lines().all(|l| l.len() <= 60));

    tempdir.close()?;

    Ok(())
}

#[test]
fn command_gff_prot_missing_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("anno")?;
    cmd.arg("gff")
        .arg("prot")
        .arg("tests/gff/no-such-file.gff3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));

    Ok(())
}
