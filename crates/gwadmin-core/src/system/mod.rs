pub mod errors;
pub mod facts;

pub use errors::SystemError;
pub use facts::{
    ADDRESS_KEY, DISTRO_KEY, OS_RELEASE_PATH, detect_address, detect_distro, ensure_static_facts,
    parse_os_release_version,
};
