// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

pub mod clustal;
pub mod fasta;
pub mod file;
pub mod record;
pub mod stockholm;
pub mod swiss;
