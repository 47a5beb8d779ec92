//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements          | Connects to                  |
//! |----------------|---------------------|------------------------------|
//! | `memory`       | SecurityRepository  | In-process state, JSON dumps |
//! | `classifier`   | ImageClassifier     | Caller-supplied score fn     |
//! | `log_listener` | StatusListener      | `log` facade                 |

pub mod classifier;
pub mod log_listener;
pub mod memory;
