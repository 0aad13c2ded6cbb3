//! Runs the library against a live LVM2 installation.
//!
//! Needs root and a spare block device, e.g. a loop device, whose path is given in
//! `LVM2_TEST_DEVICE`. Everything on that device is destroyed.
#![cfg(feature = "e2e-tests")]

use lvm2::{
    command::CommandOptions,
    executor::ExecuteError,
    models::Records,
    names::NameError,
    resources::{Lvm, SizeSpec},
};

const VOLUME_GROUP: &str = "lvm2_e2e_vg";

fn test_device() -> String {
    std::env::var("LVM2_TEST_DEVICE")
        .expect("LVM2_TEST_DEVICE should point to a spare block device")
}

#[tokio::test]
async fn lifecycle_e2e() {
    let device = test_device();
    let lvm = Lvm::new();
    let options = CommandOptions::default();

    lvm.pv()
        .create(&device, options)
        .await
        .expect("pvcreate should succeed");

    lvm.vg()
        .create(VOLUME_GROUP, None, &[device.clone()], options)
        .await
        .expect("vgcreate should succeed");

    let groups = lvm
        .vg()
        .get(VOLUME_GROUP, options)
        .await
        .expect("vgs should succeed");
    match groups.data {
        Some(Records::Brief(groups)) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].vg_name, VOLUME_GROUP);
        }
        other => panic!("unexpected report: {other:?}"),
    }

    lvm.lv()
        .create("data", &SizeSpec::Size("8M".to_string()), VOLUME_GROUP, options)
        .await
        .expect("lvcreate should succeed");

    lvm.lv()
        .extend(VOLUME_GROUP, "data", &SizeSpec::Extents(4), options)
        .await
        .expect("lvextend should succeed");

    lvm.lv()
        .rename(VOLUME_GROUP, "data", "renamed", options)
        .await
        .expect("lvrename should succeed");

    let volumes = lvm
        .lv()
        .list_in(VOLUME_GROUP, CommandOptions::builder().verbose(true).build())
        .await
        .expect("lvs should succeed");
    match volumes.data {
        Some(Records::Verbose(volumes)) => {
            assert_eq!(volumes.len(), 1);
            assert_eq!(volumes[0].base.lv_name, "renamed");
            assert!(!volumes[0].lv_uuid.is_empty());
        }
        other => panic!("unexpected report: {other:?}"),
    }

    lvm.lv()
        .remove(VOLUME_GROUP, "renamed", options)
        .await
        .expect("lvremove should succeed");

    lvm.vg()
        .remove(VOLUME_GROUP, options)
        .await
        .expect("vgremove should succeed");

    lvm.pv()
        .remove(&device, options)
        .await
        .expect("pvremove should succeed");
}

#[tokio::test]
async fn invalid_name_never_reaches_toolkit_e2e() {
    let result = Lvm::new()
        .vg()
        .remove("pvmove", CommandOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(ExecuteError::Validation(NameError::Reserved { .. }))
    ));
}
