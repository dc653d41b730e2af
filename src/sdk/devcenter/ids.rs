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

use std::fmt;

use crate::sdk::resourceids::{describe, ParseError, ParseResult, ResourceId, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevCenterId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub dev_center_name: String,
}

impl DevCenterId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        dev_center_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            dev_center_name: dev_center_name.into(),
        }
    }
}

impl ResourceId for DevCenterId {
    const NAME: &'static str = "Dev Center";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDevCenter", "Microsoft.DevCenter"),
            Segment::static_segment("staticDevCenters", "devCenters"),
            Segment::user_specified("devCenterName", "devCenterValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            dev_center_name: result.get("devCenterName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DevCenter/devCenters/{}",
            self.subscription_id, self.resource_group_name, self.dev_center_name
        )
    }
}

impl fmt::Display for DevCenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Dev Center Name", &self.dev_center_name),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GalleryId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub dev_center_name: String,
    pub gallery_name: String,
}

impl GalleryId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        dev_center_name: impl Into<String>,
        gallery_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            dev_center_name: dev_center_name.into(),
            gallery_name: gallery_name.into(),
        }
    }

    pub fn dev_center_id(&self) -> DevCenterId {
        DevCenterId::new(&self.subscription_id, &self.resource_group_name, &self.dev_center_name)
    }
}

impl ResourceId for GalleryId {
    const NAME: &'static str = "Gallery";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDevCenter", "Microsoft.DevCenter"),
            Segment::static_segment("staticDevCenters", "devCenters"),
            Segment::user_specified("devCenterName", "devCenterValue"),
            Segment::static_segment("staticGalleries", "galleries"),
            Segment::user_specified("galleryName", "galleryValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            dev_center_name: result.get("devCenterName")?,
            gallery_name: result.get("galleryName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DevCenter/devCenters/{}/galleries/{}",
            self.subscription_id, self.resource_group_name, self.dev_center_name, self.gallery_name
        )
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Dev Center Name", &self.dev_center_name),
                ("Gallery Name", &self.gallery_name),
            ],
        )
    }
}

/// Image of a dev center gallery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub dev_center_name: String,
    pub gallery_name: String,
    pub image_name: String,
}

impl ImageId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        dev_center_name: impl Into<String>,
        gallery_name: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            dev_center_name: dev_center_name.into(),
            gallery_name: gallery_name.into(),
            image_name: image_name.into(),
        }
    }

    pub fn gallery_id(&self) -> GalleryId {
        GalleryId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.dev_center_name,
            &self.gallery_name,
        )
    }
}

impl ResourceId for ImageId {
    const NAME: &'static str = "Image";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDevCenter", "Microsoft.DevCenter"),
            Segment::static_segment("staticDevCenters", "devCenters"),
            Segment::user_specified("devCenterName", "devCenterValue"),
            Segment::static_segment("staticGalleries", "galleries"),
            Segment::user_specified("galleryName", "galleryValue"),
            Segment::static_segment("staticImages", "images"),
            Segment::user_specified("imageName", "imageValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            dev_center_name: result.get("devCenterName")?,
            gallery_name: result.get("galleryName")?,
            image_name: result.get("imageName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DevCenter/devCenters/{}/galleries/{}/images/{}",
            self.subscription_id,
            self.resource_group_name,
            self.dev_center_name,
            self.gallery_name,
            self.image_name
        )
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Dev Center Name", &self.dev_center_name),
                ("Gallery Name", &self.gallery_name),
                ("Image Name", &self.image_name),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_id_round_trips_and_walks_up() {
        let id = ImageId::new("sub1", "rg1", "dc1", "default", "win11");
        let parsed = ImageId::parse(&id.id()).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(
            parsed.gallery_id().dev_center_id().id(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DevCenter/devCenters/dc1"
        );
    }

    #[test]
    fn gallery_id_is_not_an_image_id() {
        let gallery = GalleryId::new("sub1", "rg1", "dc1", "default");
        assert!(ImageId::parse(&gallery.id()).is_err());
    }
}
