//! account-session entrypoint.

use account_session::run;
use account_session::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(e.exit_code());
    }
}
