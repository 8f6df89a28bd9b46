// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for mask authoring: strokes and the per-image session.

pub mod session;
pub mod stroke;
