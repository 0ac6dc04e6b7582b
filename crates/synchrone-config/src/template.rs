//! Default update document written by `synchrone init`

/// Document written into a project that has none yet.
///
/// Enables a full update plus new-component discovery, and lists the targets a
/// `specific` update would touch.
pub const DEFAULT_DOCUMENT: &str = r#"# Update configuration for the Epaphrodites framework
# Generated by `synchrone init`
version: "v0.01-stable"
package: "packages/epaphrodites"

# Available update modes
# all: update every file shipped by the framework
# specific: update only the targets listed below
# new: add new components and swap changed ones
# `all` and `specific` cannot both be enabled.
update:
  type:
    all: true
    specific: false
    new: true

# Specific folders/files to be updated
update_targets:
  bin:
    config:
      Config.ini: true
      Config.json: true
      email.ini: true
      setDirectory.php: true

    controllers:
      controllerMap:
        routesConfig.py: true
      controllers:
        apiControllers.py: true

    database:
      config: true
      gearShift: true
      query: true
      seeders: true

    epaphrodites:
      api: true
      auth: true
      cbuild: true
      chatBot: true
      Console: true
      constant: true
      Contracts: true
      CsrfToken: true
      danho: true
      env: true
      epaphAI: true
      EpaphMozart: true
      ErrorsExceptions: true
      ExcelFiles: true
      Extension: true
      heredia: true
      Kernel: true
      path: true
      python: true
      QRCodes: true
      shares: true
      translate: true
      yedidiah: true

  public:
    layouts:
      display: true
      template: true
      widgets: true

# Optional path overrides, relative to the project root
# layout:
#   vendor: vendor/epaphrodites/packages/src/epaphrodites/init-ressources
#   new_components: vendor/epaphrodites/packages/src/epaphrodites/new-ressources
#   backups: vendor/epaphrodites/packages/src/epaphrodites/old-ressources
#   full_merge: [bin, public/layouts, config]
#   new_component_directories: [bin, public/layouts]
#   targeted_roots: [bin, public]
"#;
