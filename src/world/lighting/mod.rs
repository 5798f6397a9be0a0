//! Light lookups over the window

mod light_query;
