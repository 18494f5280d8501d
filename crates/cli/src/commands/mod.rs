pub mod browse;
pub mod query;

use ferrous_mdns::Record;

pub(crate) fn print_records(records: &[Record]) {
    for record in records {
        println!("{record}");
    }
}
