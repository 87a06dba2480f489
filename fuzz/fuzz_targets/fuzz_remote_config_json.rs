#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use mailconf::domain::ports::{
    BackendError, NoopNoticeSink, RemoteConfig, SaveConfigRequest, SaveSigningRecordRequest,
    SettingsBackend,
};
use mailconf::{ControllerConfig, ProfileStore};

struct Echo(RemoteConfig);

impl SettingsBackend for Echo {
    fn get_config(&self) -> Result<RemoteConfig, BackendError> {
        Ok(self.0.clone())
    }

    fn save_config(&self, _: &SaveConfigRequest) -> Result<(), BackendError> {
        Ok(())
    }

    fn save_signing_record(&self, _: &SaveSigningRecordRequest) -> Result<(), BackendError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    // Any server payload loads clean, and saves clean
    if let Ok(remote) = serde_json::from_slice::<RemoteConfig>(data) {
        let mut store = ProfileStore::new(
            Arc::new(Echo(remote)),
            Arc::new(NoopNoticeSink),
            &ControllerConfig::default(),
        );
        if store.load().is_ok() {
            assert!(!store.compute_dirty());
            if store.save().is_ok() {
                assert!(!store.compute_dirty());
            }
        }
    }
});
