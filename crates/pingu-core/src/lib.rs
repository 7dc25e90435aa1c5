/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the pingu encoders
//!
//! It currently contains
//!
//! - A byte sink trait with implementations for in memory buffers and files
//! - A writer wrapping such a sink with endian aware writes
//!
//! # Features
//!  - `std`: Enables sinks backed by std facilities (buffered files) and
//!    conversion from [`std::io::Error`].
//!
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod bytestream;
