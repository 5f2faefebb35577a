use alloc::sync::Arc;

use spin::Mutex;

use crate::UserFs;

/// 多线程共用的引擎，整个引擎由一把锁保护
pub type SharedUserFs = Arc<Mutex<UserFs>>;

impl UserFs {
    pub fn shared() -> SharedUserFs {
        Arc::new(Mutex::new(Self::new()))
    }
}
