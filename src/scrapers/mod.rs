//! The source-driven collection pipeline.
//!
//! Each configured source goes through the same stages:
//!
//! 1. **Compile**: turn the source's selector strings into [`selector::SourceRules`]
//! 2. **Fetch**: download the page with [`fetch::HttpFetcher`]
//! 3. **Extract**: split the page into fragments and read fields ([`extract`])
//! 4. **Enrich**: normalize the date and assign a category
//!
//! [`collector::SourceCollector`] runs these stages for one source and
//! absorbs its failures; [`run::CollectionRun`] drives it over the whole
//! configuration.
//!
//! | Failure | Effect |
//! |---------|--------|
//! | invalid selector | source yields nothing |
//! | network error, timeout, non-2xx | source yields nothing |
//! | fragment without title or link | fragment skipped |

pub mod collector;
pub mod extract;
pub mod fetch;
pub mod run;
pub mod selector;
