//! rTripdesk main entrypoint.

use rtripdesk::run;
use rtripdesk::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
