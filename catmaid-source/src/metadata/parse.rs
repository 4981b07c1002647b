//! Conversion of raw CATMAID JSON responses into typed metadata records.

use std::collections::BTreeMap;

use serde_json::Value;

use super::types::{ProjectInfo, ProjectsList, StackIdentifier, StackInfo, StackMirror};
use super::verify::{
    parse_array, parse_xyz, verify_float, verify_int, verify_object, verify_object_property,
    verify_string, verify_u32,
};
use crate::error::{CatmaidError, Result};

/// Parses one entry of a stack's `mirrors` array.
pub fn parse_stack_mirror(raw: &Value) -> Result<StackMirror> {
    let obj = verify_object(raw)?;
    Ok(StackMirror {
        id: verify_object_property(obj, "id", verify_int)?,
        title: verify_object_property(obj, "title", verify_string)?,
        file_extension: verify_object_property(obj, "file_extension", verify_string)?,
        tile_height: verify_object_property(obj, "tile_height", verify_u32)?,
        tile_width: verify_object_property(obj, "tile_width", verify_u32)?,
        tile_source_type: verify_object_property(obj, "tile_source_type", verify_int)?,
        url: verify_object_property(obj, "image_base", verify_string)?,
        position: verify_object_property(obj, "position", verify_int)?,
    })
}

/// Parses the response of `/{project}/stack/{stack}/info`.
pub fn parse_stack_info(raw: &Value) -> Result<StackInfo> {
    let obj = verify_object(raw)?;

    let dimension = verify_object_property(obj, "dimension", |v| parse_xyz(v, verify_int))?;
    let translation = verify_object_property(obj, "translation", |v| parse_xyz(v, verify_int))?;
    let resolution = verify_object_property(obj, "resolution", |v| parse_xyz(v, verify_float))?;
    let zoom_levels = verify_object_property(obj, "num_zoom_levels", verify_int)?;
    let id = verify_object_property(obj, "sid", verify_int)?;

    let mirrors = verify_object_property(obj, "mirrors", |v| {
        parse_array(v, parse_stack_mirror)
    })?
    .into_iter()
    .map(|mirror| (mirror.id.to_string(), mirror))
    .collect();

    Ok(StackInfo {
        dimension,
        translation,
        resolution,
        zoom_levels,
        id,
        mirrors,
    })
}

fn parse_stack_identifier(raw: &Value) -> Result<StackIdentifier> {
    let obj = verify_object(raw)?;
    Ok(StackIdentifier {
        id: verify_object_property(obj, "id", verify_int)?,
        title: verify_object_property(obj, "title", verify_string)?,
        comment: verify_object_property(obj, "comment", verify_string)?,
    })
}

fn parse_project(raw: &Value) -> Result<ProjectInfo> {
    let obj = verify_object(raw)?;
    let id = verify_object_property(obj, "id", verify_int)?;
    let title = verify_object_property(obj, "title", verify_string)?;
    let stacks: BTreeMap<String, StackIdentifier> =
        verify_object_property(obj, "stacks", |v| parse_array(v, parse_stack_identifier))?
            .into_iter()
            .map(|stack| (stack.id.to_string(), stack))
            .collect();

    Ok(ProjectInfo { id, title, stacks })
}

/// Parses the response of `/projects/`.
///
/// An empty array is an error: a server that lists no projects cannot be
/// browsed, and reporting it distinctly helps when the server requires
/// authentication to list anything.
pub fn parse_projects_list(raw: &Value) -> Result<ProjectsList> {
    let projects = parse_array(raw, parse_project)?;
    if projects.is_empty() {
        return Err(CatmaidError::NoProjects);
    }

    Ok(projects
        .into_iter()
        .map(|project| (project.id.to_string(), project))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mirror_json(id: i64, position: i64) -> Value {
        json!({
            "id": id,
            "title": format!("mirror {}", id),
            "file_extension": "jpg",
            "tile_height": 256,
            "tile_width": 512,
            "tile_source_type": 1,
            "image_base": format!("https://tiles{}.example.org/stack/", id),
            "position": position,
        })
    }

    fn stack_info_json() -> Value {
        json!({
            "sid": 3,
            "pid": 1,
            "title": "unused extra field",
            "dimension": {"x": 4096, "y": 2048, "z": 10},
            "translation": {"x": 10, "y": 20, "z": 30},
            "resolution": {"x": 4.0, "y": 4.0, "z": 40.0},
            "num_zoom_levels": 2,
            "mirrors": [mirror_json(7, 1), mirror_json(9, 0)],
        })
    }

    #[test]
    fn test_parse_stack_mirror() {
        let mirror = parse_stack_mirror(&mirror_json(7, 2)).unwrap();
        assert_eq!(mirror.id, 7);
        assert_eq!(mirror.title, "mirror 7");
        assert_eq!(mirror.file_extension, "jpg");
        assert_eq!(mirror.tile_height, 256);
        assert_eq!(mirror.tile_width, 512);
        assert_eq!(mirror.tile_source_type, 1);
        assert_eq!(mirror.url, "https://tiles7.example.org/stack/");
        assert_eq!(mirror.position, 2);
    }

    #[test]
    fn test_parse_stack_mirror_names_each_missing_field() {
        let fields = [
            "id",
            "title",
            "file_extension",
            "tile_height",
            "tile_width",
            "tile_source_type",
            "image_base",
            "position",
        ];
        for field in fields {
            let mut raw = mirror_json(1, 0);
            raw.as_object_mut().unwrap().remove(field);
            let err = parse_stack_mirror(&raw).unwrap_err();
            assert_eq!(
                err,
                CatmaidError::Validation(format!("missing property \"{}\"", field)),
                "field {}",
                field
            );
        }
    }

    #[test]
    fn test_parse_stack_mirror_rejects_mistyped_field() {
        let mut raw = mirror_json(1, 0);
        raw["tile_width"] = json!("wide");
        let err = parse_stack_mirror(&raw).unwrap_err();
        assert!(err.to_string().contains("\"tile_width\""), "{}", err);
    }

    #[test]
    fn test_parse_stack_info() {
        let info = parse_stack_info(&stack_info_json()).unwrap();
        assert_eq!(info.id, 3);
        assert_eq!(info.dimension, [4096, 2048, 10]);
        assert_eq!(info.translation, [10, 20, 30]);
        assert_eq!(info.resolution, [4.0, 4.0, 40.0]);
        assert_eq!(info.zoom_levels, 2);
        assert_eq!(info.mirrors.len(), 2);
        assert_eq!(info.mirrors["7"].position, 1);
        assert_eq!(info.mirrors["9"].position, 0);
    }

    #[test]
    fn test_parse_stack_info_empty_mirrors() {
        let mut raw = stack_info_json();
        raw["mirrors"] = json!([]);
        let info = parse_stack_info(&raw).unwrap();
        assert!(info.mirrors.is_empty());
    }

    #[test]
    fn test_parse_stack_info_bad_mirror_reports_path() {
        let mut raw = stack_info_json();
        raw["mirrors"][1].as_object_mut().unwrap().remove("tile_width");
        let err = parse_stack_info(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error parsing \"mirrors\": error parsing element 1: missing property \"tile_width\""
        );
    }

    #[test]
    fn test_parse_stack_info_requires_nested_dimension() {
        let mut raw = stack_info_json();
        raw["dimension"] = json!([4096, 2048, 10]);
        assert!(parse_stack_info(&raw).is_err());
    }

    #[test]
    fn test_mirrors_by_position() {
        let info = parse_stack_info(&stack_info_json()).unwrap();
        let ids: Vec<i64> = info.mirrors_by_position().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9, 7]);
    }

    #[test]
    fn test_parse_projects_list_empty() {
        assert_eq!(
            parse_projects_list(&json!([])).unwrap_err(),
            CatmaidError::NoProjects
        );
    }

    #[test]
    fn test_parse_projects_list_singleton() {
        let raw = json!([{
            "id": 1,
            "title": "Drosophila larva",
            "stacks": [
                {"id": 3, "title": "L1 CNS", "comment": "ssTEM"},
                {"id": 12, "title": "L1 CNS (dec)", "comment": ""},
            ],
        }]);
        let projects = parse_projects_list(&raw).unwrap();
        assert_eq!(projects.len(), 1);
        let project = &projects["1"];
        assert_eq!(project.title, "Drosophila larva");
        assert_eq!(project.stacks.len(), 2);
        assert_eq!(project.stacks["12"].title, "L1 CNS (dec)");
        assert_eq!(project.stacks["3"].comment, "ssTEM");
    }

    #[test]
    fn test_parse_projects_list_requires_array() {
        let err = parse_projects_list(&json!({"1": {}})).unwrap_err();
        assert!(matches!(err, CatmaidError::Validation(_)));
    }

    #[test]
    fn test_parse_projects_list_stack_missing_comment() {
        let raw = json!([{
            "id": 1,
            "title": "p",
            "stacks": [{"id": 3, "title": "s"}],
        }]);
        let err = parse_projects_list(&raw).unwrap_err();
        assert!(err.to_string().contains("missing property \"comment\""));
    }
}
