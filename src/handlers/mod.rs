// handlers/mod.rs - HTTP handlers
//
// lists:  the /lists resource (index and show are public; create, update and
//         destroy require a bearer token, update and destroy require ownership)
// system: service info and health probes
pub mod lists;
pub mod system;
