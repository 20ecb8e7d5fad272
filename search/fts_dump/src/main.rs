//! `fts-dump` CLI.

use fts_dump::{init_tracing, parse_options, run};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let reports = run(&options);
    let with_headers = reports.len() > 1;
    let mut failed = false;
    for report in reports {
        match report.result {
            Ok(body) => {
                if with_headers {
                    println!("==> {} <==", report.path.display());
                }
                print!("{body}");
            }
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: fts-dump <command> [options] <file>...");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens     Print every token as position<TAB>payload (markers as @offset)");
    eprintln!("  markers    Print the marker table: threshold, byte offset, span length");
    eprintln!("  stats      Print token counts and the most frequent payloads");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --limit=<n>        Stop each file after n tokens");
    eprintln!("  --between=<a>,<b>  With `markers`: print the text between markers a and b");
    eprintln!("  --top=<n>          With `stats`: number of frequent payloads to list (default 10)");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=fts_tokenizer=debug) for tracing output.");
}
