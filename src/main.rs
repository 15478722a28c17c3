//! # Vein Miner Demo
//!
//! Native entry point. Calls into the library's `run()` function, which sets up logging,
//! loads the configuration and plays one vein mine against the in-memory host.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```

fn main() {
    vein_miner::run();
}
