// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod aws;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod helm;
pub mod identity;
pub mod kubernetes;
pub mod provisioner;

#[cfg(test)]
pub mod test_utils;
