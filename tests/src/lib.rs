//! End-to-end runs of the scan pipeline against in-memory fakes.
//!
//! Nothing here touches a real interface: topology, ARP replies, vendor
//! lookups and probe answers are all canned, so the suite runs unprivileged.

#![cfg(test)]

mod fakes;
mod pipeline;
