//! Concepts and their name collection

use crate::description::ConceptDescription;
use crate::error::{ModelError, ModelResult};
use crate::index::{TagIndex, TagKey};
use crate::members::{ConceptAnswer, ConceptSet};
use crate::name::{ConceptName, NameId};
use crate::tag::{ConceptNameTag, TagKind};
use emr_locale::Locale;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A coded clinical idea with localized names
///
/// The concept owns its names exclusively. Names are only handed out by shared
/// reference; every tag change goes through the concept so that each locale
/// keeps a single preferred (and a single short) name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ConceptRecord", into = "ConceptRecord")]
pub struct Concept {
    concept_id: Option<i64>,
    retired: bool,
    pub(crate) names: IndexMap<NameId, ConceptName>,
    pub(crate) tag_index: TagIndex,
    next_name_id: u32,
    pub(crate) descriptions: Vec<ConceptDescription>,
    pub(crate) answers: Vec<ConceptAnswer>,
    pub(crate) concept_sets: Vec<ConceptSet>,
}

impl Concept {
    /// Create an unsaved concept with no names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a concept with a persistent identifier
    pub fn with_id(concept_id: i64) -> Self {
        Self {
            concept_id: Some(concept_id),
            ..Self::default()
        }
    }

    pub fn concept_id(&self) -> Option<i64> {
        self.concept_id
    }

    pub fn set_concept_id(&mut self, concept_id: i64) {
        self.concept_id = Some(concept_id);
    }

    /// Whether both values denote the same stored concept
    ///
    /// Unsaved concepts have no identity and never match.
    pub fn same_concept(&self, other: &Concept) -> bool {
        matches!((self.concept_id, other.concept_id), (Some(a), Some(b)) if a == b)
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn retire(&mut self) {
        self.retired = true;
    }

    /// Add a name, returning its handle
    ///
    /// A name equal to a live one already present (see
    /// [`ConceptName::same_name`]) is not added twice; the existing handle is
    /// returned and the incoming tags are ignored. Voided names never absorb
    /// an incoming name. Exclusive tags carried by a live incoming name take
    /// their scope over from the current holder.
    pub fn add_name(&mut self, name: ConceptName) -> NameId {
        if let Some(existing) = self.find_live_name_id(&name) {
            return existing;
        }

        let id = NameId(self.next_name_id);
        self.next_name_id += 1;

        if !name.is_voided() {
            for tag in name.tags() {
                if let Some(key) = TagKey::for_tag(tag, name.locale()) {
                    if let Some(previous) = self.tag_index.claim(key, id) {
                        self.strip_tag(previous, tag);
                    }
                }
            }
        }

        self.names.insert(id, name);
        id
    }

    /// Remove a name entirely
    pub fn remove_name(&mut self, id: NameId) -> ModelResult<ConceptName> {
        let name = self
            .names
            .shift_remove(&id)
            .ok_or_else(|| ModelError::unknown_name(id))?;
        self.tag_index.release_all(id);
        Ok(name)
    }

    /// Void a name; it stays in the collection but is invisible to queries
    pub fn void_name(&mut self, id: NameId, reason: impl Into<String>) -> ModelResult<()> {
        let name = self
            .names
            .get_mut(&id)
            .ok_or_else(|| ModelError::unknown_name(id))?;
        name.void(reason);
        self.tag_index.release_all(id);
        Ok(())
    }

    /// Tag a name held by this concept
    ///
    /// For preferred and short tags the current holder of the same scope loses
    /// the tag. Returns false when the name already carried the tag.
    pub fn add_name_tag(&mut self, id: NameId, tag: ConceptNameTag) -> ModelResult<bool> {
        if !self.names.contains_key(&id) {
            return Err(ModelError::unknown_name(id));
        }
        Ok(self.assign_tag(id, tag))
    }

    /// Remove a tag from a name held by this concept
    pub fn remove_name_tag(&mut self, id: NameId, tag: &ConceptNameTag) -> ModelResult<bool> {
        let name = self
            .names
            .get_mut(&id)
            .ok_or_else(|| ModelError::unknown_name(id))?;
        let removed = name.remove_tag(tag);
        if let Some(key) = TagKey::for_tag(tag, name.locale()) {
            self.tag_index.release(&key, id);
        }
        Ok(removed)
    }

    /// Make `name` the preferred name for `locale`
    ///
    /// The name is added when absent. Whichever name held the preferred tag
    /// for `locale` loses it. Calling this twice with the same name is a no-op
    /// the second time.
    pub fn set_preferred_name(&mut self, locale: &Locale, name: ConceptName) -> NameId {
        let id = self.add_name(name);
        self.assign_tag(id, ConceptNameTag::preferred_for(locale));
        id
    }

    /// Make an existing name the preferred name for `locale`
    pub fn set_preferred(&mut self, locale: &Locale, id: NameId) -> ModelResult<()> {
        self.add_name_tag(id, ConceptNameTag::preferred_for(locale))
            .map(|_| ())
    }

    /// Make `name` the short name for `locale`, with the same rules as
    /// [`set_preferred_name`](Self::set_preferred_name)
    pub fn set_short_name(&mut self, locale: &Locale, name: ConceptName) -> NameId {
        let id = self.add_name(name);
        self.assign_tag(id, ConceptNameTag::short_for(locale));
        id
    }

    /// Name by handle, voided or not
    pub fn name_by_id(&self, id: NameId) -> Option<&ConceptName> {
        self.names.get(&id)
    }

    /// Handle of a name equal to `name`, voided or not
    pub fn find_name_id(&self, name: &ConceptName) -> Option<NameId> {
        self.names
            .iter()
            .find(|(_, existing)| existing.same_name(name))
            .map(|(id, _)| *id)
    }

    fn find_live_name_id(&self, name: &ConceptName) -> Option<NameId> {
        self.names
            .iter()
            .find(|(_, existing)| !existing.is_voided() && existing.same_name(name))
            .map(|(id, _)| *id)
    }

    /// Number of live holders of an exclusive tag kind
    pub fn tag_holder_count(&self, kind: &TagKind) -> usize {
        self.tag_index.count(kind)
    }

    /// Add a description; an identical description is not added twice
    pub fn add_description(&mut self, description: ConceptDescription) {
        if !self.descriptions.contains(&description) {
            self.descriptions.push(description);
        }
    }

    pub fn descriptions(&self) -> &[ConceptDescription] {
        &self.descriptions
    }

    fn assign_tag(&mut self, id: NameId, tag: ConceptNameTag) -> bool {
        let Some(name) = self.names.get(&id) else {
            return false;
        };
        // Voided names never take a slot from the current holder
        let key = TagKey::for_tag(&tag, name.locale()).filter(|_| !name.is_voided());

        if let Some(key) = key {
            if let Some(previous) = self.tag_index.claim(key, id) {
                log::debug!("moving tag {tag} from name {previous} to {id}");
                self.strip_tag(previous, &tag);
            }
        }

        self.names
            .get_mut(&id)
            .is_some_and(|name| name.add_tag(tag))
    }

    fn strip_tag(&mut self, id: NameId, tag: &ConceptNameTag) {
        if let Some(name) = self.names.get_mut(&id) {
            name.remove_tag(tag);
        }
    }
}

/// Flat serialized form of a [`Concept`]
///
/// Deserialization replays every name through [`Concept::add_name`], so the
/// tag index is rebuilt and conflicting exclusive tags resolve in favour of
/// the later name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<i64>,
    #[serde(default)]
    pub retired: bool,
    #[serde(default)]
    pub names: Vec<ConceptName>,
    #[serde(default)]
    pub descriptions: Vec<ConceptDescription>,
    #[serde(default)]
    pub answers: Vec<ConceptAnswer>,
    #[serde(default)]
    pub set_members: Vec<ConceptSet>,
}

impl From<ConceptRecord> for Concept {
    fn from(record: ConceptRecord) -> Self {
        let mut concept = Concept {
            concept_id: record.concept_id,
            retired: record.retired,
            ..Concept::default()
        };
        for name in record.names {
            concept.add_name(name);
        }
        for description in record.descriptions {
            concept.add_description(description);
        }
        for answer in record.answers {
            concept.add_answer(answer);
        }
        concept.concept_sets = record.set_members;
        concept.sort_concept_sets();
        concept
    }
}

impl From<Concept> for ConceptRecord {
    fn from(concept: Concept) -> Self {
        Self {
            concept_id: concept.concept_id,
            retired: concept.retired,
            names: concept.names.into_values().collect(),
            descriptions: concept.descriptions,
            answers: concept.answers,
            set_members: concept.concept_sets,
        }
    }
}
