use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

fn round_trip_test(text: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.txt");
    std::fs::write(&in_path,format!("{}\n",text))?;

    let mut zip = Command::cargo_bin("bwtzip")?;
    zip.current_dir(temp_dir.path())
        .arg(&in_path)
        .assert()
        .success();

    let mut unzip = Command::cargo_bin("bwtunzip")?;
    unzip.current_dir(temp_dir.path())
        .arg(temp_dir.path().join("bwtencoded.bin"))
        .assert()
        .success();

    match std::fs::read(temp_dir.path().join("recovered.txt")) {
        Ok(recovered) => {
            assert_eq!(recovered,text.as_bytes());
        },
        _ => panic!("unable to read recovered output")
    }
    Ok(())
}

#[test]
fn compression_round_trip() -> STDRESULT {
    round_trip_test("abc")?;
    round_trip_test("mississippi")?;
    round_trip_test("pack.my.box.with.five.dozen.liquor.jugs")
}

#[test]
fn suffix_array_output() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.txt");
    std::fs::write(&in_path,"abracadabra\n")?;

    let mut cmd = Command::cargo_bin("st2sa")?;
    cmd.current_dir(temp_dir.path())
        .arg(&in_path)
        .assert()
        .success();

    let listing = std::fs::read_to_string(temp_dir.path().join("output_sa.txt"))?;
    let starts: Vec<usize> = listing.lines().map(|l| l.parse()).collect::<Result<_,_>>()?;
    assert_eq!(starts,vec![12,11,8,1,4,6,9,2,5,7,10,3]);
    Ok(())
}

#[test]
fn illegal_input_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.txt");
    std::fs::write(&in_path,"money$bags\n")?;

    let mut cmd = Command::cargo_bin("bwtzip")?;
    cmd.current_dir(temp_dir.path())
        .arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sentinel"));
    Ok(())
}

#[test]
fn corrupt_archive_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("bad.bin");
    std::fs::write(&in_path,[0u8;4])?;

    let mut cmd = Command::cargo_bin("bwtunzip")?;
    cmd.current_dir(temp_dir.path())
        .arg(&in_path)
        .assert()
        .failure();
    Ok(())
}
