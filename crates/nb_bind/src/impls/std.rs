use ::std::net::IpAddr;
use ::std::path::PathBuf;
use ::std::time::SystemTime;

crate::impl_reflect_opaque!(PathBuf);
crate::impl_reflect_opaque!(IpAddr);
crate::impl_reflect_opaque!(SystemTime);
