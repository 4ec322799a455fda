use clap::{arg,crate_version,Command};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();
    let matches = Command::new("st2sa")
        .about("Write the suffix array of a line of text")
        .after_long_help(
"Reads the first line of the input file, terminates it with the sentinel,
and writes one 1-based suffix start per line to `output_sa.txt`.")
        .version(crate_version!())
        .arg(arg!(<input> "input path"))
        .get_matches();

    let path = matches.get_one::<String>("input").expect(RCH);
    let dat = std::fs::read(path)?;
    match bwtzip::suffix_tree::SuffixTree::build(first_line(&dat)) {
        Ok(tree) => {
            let lines: String = tree.suffix_array().iter()
                .map(|start| format!("{}\n",start + 1))
                .collect();
            std::fs::write("output_sa.txt",lines)?;
            Ok(())
        },
        Err(e) => {
            eprintln!("{}",e);
            std::process::exit(1);
        }
    }
}

/// the tree is built over a single line, terminator excluded
fn first_line(dat: &[u8]) -> &[u8] {
    let mut line = dat.split(|&b| b == b'\n').next().unwrap_or(dat);
    if let Some((&b'\r',rest)) = line.split_last() {
        line = rest;
    }
    line
}
