use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub collection: CollectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Filesystem types dropped from the mounted-partition enumeration.
    pub exclude_fstypes: Vec<String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            exclude_fstypes: default_exclude_fstypes(),
        }
    }
}

// Pseudo and stacking filesystems that are not backed by a physical partition.
fn default_exclude_fstypes() -> Vec<String> {
    [
        "proc",
        "sysfs",
        "devtmpfs",
        "devpts",
        "tmpfs",
        "cgroup",
        "cgroup2",
        "pstore",
        "bpf",
        "autofs",
        "mqueue",
        "hugetlbfs",
        "debugfs",
        "tracefs",
        "securityfs",
        "fusectl",
        "configfs",
        "ramfs",
        "binfmt_misc",
        "rpc_pipefs",
        "nsfs",
        "efivarfs",
        "overlay",
        "squashfs",
    ]
    .map(String::from)
    .to_vec()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the snapshot JSON emitted by the binary.
    pub pretty: bool,
}

impl AppConfig {
    /// Load from CONFIG_FILE (default `config.toml`); built-in defaults apply
    /// when no config file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("read config {path}"))),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.collection
                .exclude_fstypes
                .iter()
                .all(|t| !t.trim().is_empty()),
            "collection.exclude_fstypes entries must be non-empty"
        );
        Ok(())
    }
}
