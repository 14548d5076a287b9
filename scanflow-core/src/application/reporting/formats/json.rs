//! JSON output format

use serde_json::json;

use crate::domain::package::DiscoveredPackage;
use crate::domain::project::Project;
use crate::domain::resource::CodebaseResource;

/// Generate the full project results document.
pub fn generate_json_output(
    project: &Project,
    packages: &[DiscoveredPackage],
    resources: &[CodebaseResource],
) -> Result<String, serde_json::Error> {
    let document = json!({
        "project": {
            "uuid": project.uuid,
            "name": project.name,
            "created_date": project.created_date,
            "extra_data": project.extra_data,
        },
        "packages": packages,
        "resources": resources,
    });
    serde_json::to_string_pretty(&document)
}
