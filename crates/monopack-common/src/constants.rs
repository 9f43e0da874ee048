//! File conventions, manifest keys, and build defaults.

/// Repository and component package descriptor filename.
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest section holding monorepo settings.
pub const MANIFEST_SECTION: &str = "weweb";

/// Key inside [`MANIFEST_SECTION`] declaring the components.
pub const COMPONENTS_KEY: &str = "components";

/// Key inside [`MANIFEST_SECTION`] explicitly marking a monorepo.
pub const MONOREPO_KEY: &str = "monorepo";

/// Key inside a component's own [`MANIFEST_SECTION`] declaring its type.
pub const TYPE_KEY: &str = "type";

/// Stem of the per-component configuration file.
pub const CONFIG_STEM: &str = "ww-config";

/// Accepted configuration extensions, in resolution order (script form first).
pub const CONFIG_EXTENSIONS: [&str; 2] = ["js", "json"];

/// Directory inside each component that holds its conventional source file.
pub const SOURCE_DIR: &str = "src";

/// Version stamped on components when the manifest declares none.
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Host-provided global function the artifact registers components with.
pub const HOST_REGISTER_GLOBAL: &str = "addWwComponent";

/// Polling interval of the registration handshake, in milliseconds.
pub const REGISTRATION_POLL_MS: u64 = 10;

/// Prefix of the temporary build workspace created under the repository root.
pub const WORKSPACE_PREFIX: &str = ".monopack-build-";

/// Filename of the synthesized aggregation module inside the workspace.
pub const ENTRY_FILE: &str = "index.js";

/// Filename of the serialized toolchain configuration inside the workspace.
pub const TOOLCHAIN_CONFIG_FILE: &str = "toolchain.config.json";

/// Default output directory, relative to the repository root.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Default artifact filename.
pub const DEFAULT_OUTPUT_FILE: &str = "monorepo-bundle.js";

/// Default exported library name of the artifact.
pub const DEFAULT_LIBRARY_NAME: &str = "WeWebMonorepoComponents";

/// Default toolchain adapter program.
pub const DEFAULT_TOOLCHAIN: &str = "monopack-webpack";

/// Platform modules that must resolve to an empty implementation inside the
/// artifact, since the host is a browser-like environment.
pub const DISABLED_PLATFORM_MODULES: [&str; 28] = [
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "punycode",
    "querystring",
    "readline",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "zlib",
];
