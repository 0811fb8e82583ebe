// SPDX-License-Identifier: Apache-2.0

//! HTTP agents configured with the platform's TLS roots.

pub mod agent;
pub mod authenticated_agent;
