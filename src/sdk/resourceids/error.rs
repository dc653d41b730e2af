// This file is part of the terraform-provider-azurerm project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

/// A user-specified segment was absent or empty in the parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {id_type} from {input:?}: the segment {segment_name:?} was not specified; expected an ID in the format {template}")]
pub struct SegmentNotSpecifiedError {
    pub id_type: &'static str,
    pub segment_name: &'static str,
    pub input: String,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parsing {id_type}: the input was empty")]
    Empty { id_type: &'static str },

    #[error(transparent)]
    SegmentNotSpecified(#[from] SegmentNotSpecifiedError),

    #[error("parsing {id_type} from {input:?}: expected segment {position} to be {expected:?} but got {actual:?}; expected an ID in the format {template}")]
    UnexpectedSegment {
        id_type: &'static str,
        input: String,
        position: usize,
        expected: &'static str,
        actual: String,
        template: String,
    },

    #[error("parsing {id_type} from {input:?}: found {count} unexpected trailing segment(s); expected an ID in the format {template}")]
    UnexpectedTrailingSegments {
        id_type: &'static str,
        input: String,
        count: usize,
        template: String,
    },

    #[error("parsing {id_type} from {input:?}: the segment {segment_name:?} has value {actual:?} but must be one of: {possible_values}")]
    InvalidConstant {
        id_type: &'static str,
        input: String,
        segment_name: &'static str,
        actual: String,
        possible_values: String,
    },
}

impl ParseError {
    pub fn id_type(&self) -> &'static str {
        match self {
            ParseError::Empty { id_type }
            | ParseError::UnexpectedSegment { id_type, .. }
            | ParseError::UnexpectedTrailingSegments { id_type, .. }
            | ParseError::InvalidConstant { id_type, .. } => id_type,
            ParseError::SegmentNotSpecified(err) => err.id_type,
        }
    }
}
