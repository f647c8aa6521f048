//! Process exit codes. Only success vs. failure is part of the contract.

pub const SUCCESS: i32 = 0;
pub const INPUT_ERROR: i32 = 2; // Missing/unparsable input or failed write
