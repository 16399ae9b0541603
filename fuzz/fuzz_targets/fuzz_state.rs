//! Fuzz target for checkpoint decoding.
//!
//! Arbitrary bytes must either decode to a state that re-encodes to the
//! same bytes, or be rejected without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use philox_core::{PhiloxEngine, PhiloxState};

fuzz_target!(|data: &[u8]| {
    match PhiloxState::from_bytes(data) {
        Ok(state) => {
            assert_eq!(data.len(), PhiloxState::SIZE);
            assert_eq!(state.as_bytes(), data);

            let mut engine = PhiloxEngine::from_state(state);
            engine.next_block();
            assert_eq!(engine.key(), &state.key);
        }
        Err(_) => assert_ne!(data.len(), PhiloxState::SIZE),
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = serde_json::from_str::<PhiloxState>(text);
    }
});
