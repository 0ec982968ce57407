// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! The integer width features select the payload type of `Value::Int` and
//! exactly one of them must be enabled.

#[cfg(not(any(feature = "int32", feature = "int64")))]
compile_error!("No integer width feature selected: choose one of 'int32' or 'int64'");

#[cfg(all(feature = "int32", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int32' and 'int64' features simultaneously: choose one integer width"
);
