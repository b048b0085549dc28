pub mod concurrent_map;
