// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::types::NodeId;

/// Error returned by fallible [`Scene`](crate::Scene) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a live node.
    StaleNode(NodeId),
    /// Children can only be added to groups.
    NotAGroup(NodeId),
    /// The node exists but is the wrong kind of element for the operation.
    WrongElement {
        /// Node that was addressed.
        id: NodeId,
        /// Tag of the element the operation needs.
        expected: &'static str,
    },
    /// The root group cannot be removed.
    RootRemoval,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNode(id) => write!(f, "node {id} is not alive"),
            Self::NotAGroup(id) => write!(f, "node {id} is not a group and cannot have children"),
            Self::WrongElement { id, expected } => {
                write!(f, "node {id} is not a <{expected}> element")
            }
            Self::RootRemoval => f.write_str("the root group cannot be removed"),
        }
    }
}

impl core::error::Error for SceneError {}
