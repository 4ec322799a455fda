use clap::{arg,crate_version,Command};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();
    let matches = Command::new("bwtunzip")
        .about("Expand a file packed by bwtzip")
        .after_long_help("Reads the packed binary and writes the text to `recovered.txt`.")
        .version(crate_version!())
        .arg(arg!(<input> "input path"))
        .get_matches();

    let path = matches.get_one::<String>("input").expect(RCH);
    let dat = std::fs::read(path)?;
    match bwtzip::bwt_huff::expand(&dat) {
        Ok(text) => {
            std::fs::write("recovered.txt",text)?;
            Ok(())
        },
        Err(e) => {
            eprintln!("{}",e);
            std::process::exit(1);
        }
    }
}
