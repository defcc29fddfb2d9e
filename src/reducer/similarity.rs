//! Attribute-comparison primitives for the reducer
//!
//! Grouping treats a missing attribute as its own "undefined" value:
//! two nodes that both lack `age` group together, and neither groups
//! with any concrete `age`. `Option<&AttributeValue>` equality gives
//! exactly that.

use crate::graph::{AttributeName, AttributeValue, Node};

/// Deep equality over the full attribute map
pub(crate) fn same_attributes(a: &Node, b: &Node) -> bool {
    a.attributes == b.attributes
}

/// Group nodes by deep equality of their whole attribute maps,
/// preserving first-encounter order.
pub(crate) fn group_by_attributes(nodes: Vec<&Node>) -> Vec<Vec<&Node>> {
    let mut groups: Vec<Vec<&Node>> = Vec::new();
    for node in nodes {
        if let Some(group) = groups
            .iter_mut()
            .find(|group| same_attributes(group[0], node))
        {
            group.push(node);
        } else {
            groups.push(vec![node]);
        }
    }
    groups
}

/// Group nodes hierarchically along a priority list: split on the
/// first attribute's value, then refine each group with the remaining
/// attributes. Subgroups of the same parent stay adjacent, so group
/// order follows the hierarchy.
pub(crate) fn group_by_priority<'a>(
    nodes: Vec<&'a Node>,
    priority: &[AttributeName],
) -> Vec<Vec<&'a Node>> {
    let Some((attribute, rest)) = priority.split_first() else {
        return vec![nodes];
    };

    let mut groups: Vec<(Option<&AttributeValue>, Vec<&Node>)> = Vec::new();
    for node in nodes {
        let key = node.attribute(attribute);
        if let Some((_, group)) = groups.iter_mut().find(|(k, _)| *k == key) {
            group.push(node);
        } else {
            groups.push((key, vec![node]));
        }
    }

    groups
        .into_iter()
        .flat_map(|(_, group)| group_by_priority(group, rest))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_full_attributes() {
        let a1 = Node::new("a1").attr("a", 1i64);
        let a2 = Node::new("a2").attr("a", 1i64);
        let b = Node::new("b").attr("b", 2i64);

        let groups = group_by_attributes(vec![&a1, &b, &a2]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2); // a1, a2
        assert_eq!(groups[1].len(), 1); // b
    }

    #[test]
    fn test_undefined_is_its_own_group() {
        let with = Node::new("w").attr("age", 1i64);
        let without = Node::new("wo");
        let also_without = Node::new("awo");

        let groups = group_by_priority(vec![&with, &without, &also_without], &["age".into()]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].len(), 2); // the two undefineds together
    }

    #[test]
    fn test_hierarchical_refinement() {
        let n1 = Node::new("n1").attr("age", 1i64).attr("type", "person");
        let n2 = Node::new("n2").attr("age", 1i64).attr("type", "robot");
        let n3 = Node::new("n3").attr("age", 1i64).attr("type", "person");

        // Same age, split by type at the second level
        let groups = group_by_priority(vec![&n1, &n2, &n3], &["age".into(), "type".into()]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2); // persons
        assert_eq!(groups[1].len(), 1); // robot
    }
}
