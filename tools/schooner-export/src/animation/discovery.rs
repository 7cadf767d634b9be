//! Finding the actions that belong to an object

use hashbrown::HashSet;

use super::naming::base_name;
use crate::report::Reporter;
use crate::scene::{Action, ArmatureData, Scene, SceneObject};

/// Any data path containing this animates a quaternion rotation
const QUATERNION: &str = "quaternion";

/// Whether `action` is named `<object>Action[.<Name>]`
fn belongs_to(action: &Action, object: &str) -> bool {
    base_name(&action.name)
        .strip_suffix("Action")
        .is_some_and(|owner| owner == object)
}

/// Actions of a mesh object that animate its quaternion rotation, in scene
/// order
pub fn actions_of_object<'a>(scene: &'a Scene, object: &SceneObject) -> Vec<&'a Action> {
    scene
        .actions
        .iter()
        .filter(|action| belongs_to(action, &object.name))
        .filter(|action| {
            let rotates = action
                .curves
                .iter()
                .any(|c| c.data_path.contains(QUATERNION));
            if !rotates {
                tracing::debug!("{}: no quaternion curves, skipped", action.name);
            }
            rotates
        })
        .collect()
}

/// Actions of an armature, in scene order.
///
/// Every bone group with channels must animate quaternion rotation;
/// actions that break this are skipped with a warning.
pub fn actions_of_armature<'a>(
    scene: &'a Scene,
    object: &SceneObject,
    armature: &ArmatureData,
    reporter: &mut dyn Reporter,
) -> Vec<&'a Action> {
    let bones: HashSet<&str> = armature.bones.iter().map(|b| b.name.as_str()).collect();

    let mut actions = Vec::new();
    for action in scene.actions.iter().filter(|a| belongs_to(a, &object.name)) {
        match non_quaternion_group(action, &bones) {
            None => actions.push(action),
            Some(bone) => reporter.warn(&format!(
                "{}: action '{}' animates bone '{}' without quaternion rotation, skipped",
                object.name, action.name, bone
            )),
        }
    }
    actions
}

/// First bone group of `action` that has channels but no quaternion curve
fn non_quaternion_group<'a>(action: &'a Action, bones: &HashSet<&str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    action
        .curves
        .iter()
        .filter_map(|c| c.group.as_deref())
        .filter(|group| bones.contains(group) && seen.insert(*group))
        .find(|group| {
            !action
                .group_channels(group)
                .any(|c| c.data_path.contains(QUATERNION))
        })
}
