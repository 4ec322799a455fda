use clap::{arg,crate_version,Command};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();
    let matches = Command::new("bwtzip")
        .about("Compress a line of text with the BWT pipeline")
        .after_long_help("Reads the first line of the input file and writes `bwtencoded.bin`.")
        .version(crate_version!())
        .arg(arg!(<input> "input path"))
        .get_matches();

    let path = matches.get_one::<String>("input").expect(RCH);
    let dat = std::fs::read(path)?;
    match bwtzip::bwt_huff::compress(first_line(&dat)) {
        Ok(packed) => {
            std::fs::write("bwtencoded.bin",packed)?;
            Ok(())
        },
        Err(e) => {
            eprintln!("{}",e);
            std::process::exit(1);
        }
    }
}

/// the encoder consumes a single line, terminator excluded
fn first_line(dat: &[u8]) -> &[u8] {
    let mut line = dat.split(|&b| b == b'\n').next().unwrap_or(dat);
    if let Some((&b'\r',rest)) = line.split_last() {
        line = rest;
    }
    line
}
