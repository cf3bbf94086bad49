//! Strategy routing over synthetic installation paths.
//!
//! Routing must be a pure function of whether the installation root lies
//! under the self-managed data directory, and executing a plan must only
//! ever touch the collaborator belonging to that plan.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use semver::Version;

use quill_cli::config::{Platform, UpdateConfig};
use quill_cli::index::Release;
use quill_cli::update::{
    Installer, PackageFacility, PinnedSpec, ResolutionRequest, RuntimeEnvironment,
    UpdateDispatcher, UpdatePlan,
};

#[derive(Default)]
struct CountingFacility {
    calls: AtomicUsize,
}

impl PackageFacility for CountingFacility {
    async fn install_pinned(&self, _spec: &PinnedSpec) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct CountingInstaller {
    calls: AtomicUsize,
}

impl Installer for CountingInstaller {
    async fn run(&self, _request: &ResolutionRequest) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn dispatcher(
    root: PathBuf,
    data_dir: &str,
) -> UpdateDispatcher<CountingFacility, CountingInstaller> {
    let config = UpdateConfig::resolve_with(Platform::Linux, Some(data_dir)).unwrap();
    let environment = RuntimeEnvironment::new(root, Version::new(1, 85, 0));
    UpdateDispatcher::new(
        environment,
        config,
        CountingFacility::default(),
        CountingInstaller::default(),
    )
}

fn release(v: &str) -> Release {
    Release::new("quill", Version::parse(v).unwrap())
}

#[tokio::test]
async fn root_under_data_dir_routes_to_reinstall() {
    let d = dispatcher(PathBuf::from("/data/quill/installs/1.8.0"), "/data/quill");
    let plan = d.plan(&release("2.0.0"));

    assert!(matches!(plan, UpdatePlan::ResolverDrivenReinstall { .. }));

    d.execute(&plan).await.unwrap();
    assert_eq!(d.installer().calls.load(Ordering::SeqCst), 1);
    assert_eq!(d.facility().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn root_outside_data_dir_routes_to_direct_upgrade() {
    let d = dispatcher(PathBuf::from("/home/user/.cargo"), "/data/quill");
    let plan = d.plan(&release("2.0.0"));

    assert!(matches!(plan, UpdatePlan::DirectUpgrade { .. }));

    d.execute(&plan).await.unwrap();
    assert_eq!(d.facility().calls.load(Ordering::SeqCst), 1);
    assert_eq!(d.installer().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn symlinked_root_classifies_as_its_target() {
    #[cfg(unix)]
    {
        use tempfile::TempDir;

        let data_dir = TempDir::new().unwrap();
        let real_root = data_dir.path().join("installs");
        std::fs::create_dir_all(&real_root).unwrap();

        let elsewhere = TempDir::new().unwrap();
        let link = elsewhere.path().join("quill-current");
        std::os::unix::fs::symlink(&real_root, &link).unwrap();

        let d = dispatcher(link, data_dir.path().to_str().unwrap());
        assert!(matches!(
            d.plan(&release("2.0.0")),
            UpdatePlan::ResolverDrivenReinstall { .. }
        ));
    }
}

#[tokio::test]
async fn reinstall_plan_pins_exactly_one_dependency() {
    let d = dispatcher(PathBuf::from("/data/quill"), "/data/quill");

    let UpdatePlan::ResolverDrivenReinstall { request } = d.plan(&release("1.9.0")) else {
        panic!("expected reinstall plan");
    };

    assert_eq!(request.root.dependency, "quill");
    assert_eq!(request.root.pin(), "=1.9.0");
    assert!(request.update);
    assert!(!request.dry_run);

    let manifest = request.root.to_manifest().unwrap();
    assert!(manifest.contains("quill = \"=1.9.0\""));
}

#[tokio::test]
async fn direct_plan_carries_exact_pin_spec() {
    let d = dispatcher(PathBuf::from("/opt/tools"), "/data/quill");

    let UpdatePlan::DirectUpgrade { spec } = d.plan(&release("2.1.0")) else {
        panic!("expected direct upgrade plan");
    };

    assert_eq!(spec.to_string(), "quill==2.1.0");
}
