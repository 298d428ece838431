//! Spreadsheet Export Example
//!
//! Splits a CSV file the way a spreadsheet application writes it: CRLF
//! line endings, doubled quotes, multi-line cells and values truncated
//! with an ellipsis. The truncated values are passed through unchanged.
//!
//! Run with: cargo run --example excel-export

use csvsplit::{CsvParser, Dialect, HeaderMode, Table};

const EXPORT: &str = "sku,description,barcode\r\n\
1001,\"Bolt, M6 x 20\",4006381333931\r\n\
1002,\"12\"\" flat bar, galvan…\",4.00638E+12\r\n\
1003,\"Bracket\r\n(left hand)\",40063813339…\r\n";

fn main() {
    println!("Spreadsheet Export Example");
    println!("==========================\n");

    let parser = CsvParser::new(Dialect::csv());
    let result = match parser.parse(EXPORT) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", e.format_with_source(EXPORT));
            std::process::exit(1);
        }
    };

    println!("Records:");
    for record in &result {
        println!("  line {:>2}: {:?}", record.position().line, record.fields());
    }

    let table = match Table::from_result(result, HeaderMode::Strict) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nDescriptions:");
    for description in table.column("description").unwrap_or_default().into_iter().flatten() {
        println!("  {}", description.replace("\r\n", " / "));
    }

    println!("\nAs JSON:");
    match serde_json::to_string_pretty(&table.to_json()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }

    println!("\nA truncated quote is reported with its position:");
    let broken = "sku,description\r\n1004,\"Hinge, brass";
    if let Err(e) = parser.parse(broken) {
        print!("{}", e.format_with_source(broken));
    }
}
