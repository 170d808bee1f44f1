// ABOUTME: Test helper modules shared by the integration tests
// ABOUTME: Re-exports the in-process HTTP request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod axum_test;
