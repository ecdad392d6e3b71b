//! Dependent-selector chain Ciclo → Grado → Sección → Curso → Docente.
//!
//! Every screen that assigns, enrolls or takes attendance drives some prefix
//! of this chain. The coordinator owns the selected id and the option list of
//! each stage; setters return the one child fetch to run (if any) instead of
//! touching the network themselves, so the update loop stays the single
//! writer and the whole thing is testable without I/O.

use crate::api::types::{Course, Grade, SchoolCycle, Section, TeacherRef};
use crate::remote::Remote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Grades,
    Sections,
    Courses,
    Teachers,
}

/// A child fetch requested by a setter: load `stage`'s option list scoped to
/// `parent_id`, committing under `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeFetch {
    pub stage: Stage,
    pub parent_id: i32,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct Cascade {
    pub cycles: Remote<Vec<SchoolCycle>>,
    pub grades: Remote<Vec<Grade>>,
    pub sections: Remote<Vec<Section>>,
    pub courses: Remote<Vec<Course>>,
    pub teachers: Remote<Vec<TeacherRef>>,
    cycle: Option<i32>,
    grade: Option<i32>,
    section: Option<i32>,
    course: Option<i32>,
    teacher: Option<i32>,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root list load (no parent). Returns the generation to commit under.
    pub fn begin_cycles(&mut self) -> u64 {
        self.cycles.begin()
    }

    pub fn cycle(&self) -> Option<i32> {
        self.cycle
    }

    pub fn grade(&self) -> Option<i32> {
        self.grade
    }

    pub fn section(&self) -> Option<i32> {
        self.section
    }

    pub fn course(&self) -> Option<i32> {
        self.course
    }

    pub fn teacher(&self) -> Option<i32> {
        self.teacher
    }

    pub fn set_cycle(&mut self, id: Option<i32>) -> Option<CascadeFetch> {
        if self.cycle == id {
            return None;
        }
        self.cycle = id;
        self.clear_from(Stage::Grades);
        let parent_id = id?;
        Some(CascadeFetch {
            stage: Stage::Grades,
            parent_id,
            generation: self.grades.begin(),
        })
    }

    pub fn set_grade(&mut self, id: Option<i32>) -> Option<CascadeFetch> {
        if self.grade == id {
            return None;
        }
        self.grade = id;
        self.clear_from(Stage::Sections);
        let parent_id = id?;
        Some(CascadeFetch {
            stage: Stage::Sections,
            parent_id,
            generation: self.sections.begin(),
        })
    }

    /// Courses hang off the grade (CourseGrade join), so the fetch triggered
    /// by picking a section is scoped to the nearest scoping ancestor.
    pub fn set_section(&mut self, id: Option<i32>) -> Option<CascadeFetch> {
        if self.section == id {
            return None;
        }
        self.section = id;
        self.clear_from(Stage::Courses);
        id?;
        let parent_id = self.grade?;
        Some(CascadeFetch {
            stage: Stage::Courses,
            parent_id,
            generation: self.courses.begin(),
        })
    }

    pub fn set_course(&mut self, id: Option<i32>) -> Option<CascadeFetch> {
        if self.course == id {
            return None;
        }
        self.course = id;
        self.clear_from(Stage::Teachers);
        let parent_id = id?;
        Some(CascadeFetch {
            stage: Stage::Teachers,
            parent_id,
            generation: self.teachers.begin(),
        })
    }

    pub fn set_teacher(&mut self, id: Option<i32>) -> Option<CascadeFetch> {
        if self.teacher == id {
            return None;
        }
        self.teacher = id;
        None
    }

    /// Re-requests the section options for the current grade, keeping the
    /// selection. Used after a new section is created.
    pub fn refresh_sections(&mut self) -> Option<CascadeFetch> {
        let parent_id = self.grade?;
        Some(CascadeFetch {
            stage: Stage::Sections,
            parent_id,
            generation: self.sections.begin(),
        })
    }

    /// Clears the selection and option list of `stage` and everything deeper.
    fn clear_from(&mut self, stage: Stage) {
        match stage {
            Stage::Grades => {
                self.grade = None;
                self.grades.reset();
                self.clear_from(Stage::Sections);
            }
            Stage::Sections => {
                self.section = None;
                self.sections.reset();
                self.clear_from(Stage::Courses);
            }
            Stage::Courses => {
                self.course = None;
                self.courses.reset();
                self.clear_from(Stage::Teachers);
            }
            Stage::Teachers => {
                self.teacher = None;
                self.teachers.reset();
            }
        }
    }

    /// Full reset when leaving a screen; in-flight requests become stale.
    pub fn reset(&mut self) {
        self.cycle = None;
        self.cycles.reset();
        self.clear_from(Stage::Grades);
    }

    pub fn selected_cycle(&self) -> Option<&SchoolCycle> {
        let id = self.cycle?;
        self.cycles.items().iter().find(|c| c.id == id)
    }

    pub fn selected_grade(&self) -> Option<&Grade> {
        let id = self.grade?;
        self.grades.items().iter().find(|g| g.id == id)
    }

    pub fn selected_section(&self) -> Option<&Section> {
        let id = self.section?;
        self.sections.items().iter().find(|s| s.id == id)
    }

    pub fn selected_course(&self) -> Option<&Course> {
        let id = self.course?;
        self.courses.items().iter().find(|c| c.id == id)
    }

    pub fn selected_teacher(&self) -> Option<&TeacherRef> {
        let id = self.teacher?;
        self.teachers.items().iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(id: i32, name: &str) -> Grade {
        Grade {
            id,
            name: name.to_string(),
            level: "Básicos".to_string(),
            order: id,
            is_active: true,
        }
    }

    fn section(id: i32, grade_id: i32, name: &str) -> Section {
        Section {
            id,
            name: name.to_string(),
            capacity: 30,
            grade_id,
            teacher_id: None,
        }
    }

    #[test]
    fn setting_a_cycle_requests_its_grades() {
        let mut cascade = Cascade::new();
        let fetch = cascade.set_cycle(Some(2025)).expect("fetch plan");
        assert_eq!(fetch.stage, Stage::Grades);
        assert_eq!(fetch.parent_id, 2025);
        assert!(cascade.grades.is_loading());
    }

    #[test]
    fn resetting_same_value_is_a_no_op() {
        let mut cascade = Cascade::new();
        let fetch = cascade.set_cycle(Some(2025)).unwrap();
        assert!(cascade.grades.commit(fetch.generation, Ok(vec![grade(7, "7mo Grado")])));
        cascade.set_grade(Some(7));

        // Same cycle again: no fetch, grade selection survives.
        assert!(cascade.set_cycle(Some(2025)).is_none());
        assert_eq!(cascade.grade(), Some(7));
        assert_eq!(cascade.grades.items().len(), 1);
    }

    #[test]
    fn changing_an_ancestor_clears_every_descendant() {
        let mut cascade = Cascade::new();
        let fetch = cascade.set_cycle(Some(2025)).unwrap();
        cascade
            .grades
            .commit(fetch.generation, Ok(vec![grade(7, "7mo Grado"), grade(8, "8vo Grado")]));

        let fetch = cascade.set_grade(Some(7)).unwrap();
        cascade
            .sections
            .commit(fetch.generation, Ok(vec![section(1, 7, "A"), section(2, 7, "B")]));
        cascade.set_section(Some(1));

        cascade.set_cycle(Some(2026));
        assert_eq!(cascade.grade(), None);
        assert_eq!(cascade.section(), None);
        assert!(cascade.grades.items().is_empty());
        assert!(cascade.sections.items().is_empty());
        assert!(cascade.courses.items().is_empty());
        assert!(cascade.teachers.items().is_empty());
    }

    #[test]
    fn clearing_a_stage_fires_no_fetch() {
        let mut cascade = Cascade::new();
        cascade.set_cycle(Some(2025));
        let fetch = cascade.set_cycle(None);
        assert!(fetch.is_none());
        assert!(!cascade.grades.is_loading());
    }

    #[test]
    fn picking_grade_scopes_sections_and_drops_old_selection() {
        let mut cascade = Cascade::new();
        let fetch = cascade.set_cycle(Some(2025)).unwrap();
        cascade
            .grades
            .commit(fetch.generation, Ok(vec![grade(7, "7mo Grado"), grade(8, "8vo Grado")]));

        let fetch = cascade.set_grade(Some(8)).unwrap();
        cascade
            .sections
            .commit(fetch.generation, Ok(vec![section(10, 8, "A")]));
        cascade.set_section(Some(10));

        // Switch to 7mo Grado: section 10 is no longer valid and must be gone
        // before the new option list even arrives.
        let fetch = cascade.set_grade(Some(7)).expect("sections fetch");
        assert_eq!(cascade.section(), None);
        assert_eq!(fetch.parent_id, 7);
        cascade
            .sections
            .commit(fetch.generation, Ok(vec![section(1, 7, "A"), section(2, 7, "B")]));
        assert!(cascade.sections.items().iter().all(|s| s.grade_id == 7));
    }

    #[test]
    fn section_pick_requests_courses_scoped_to_grade() {
        let mut cascade = Cascade::new();
        let fetch = cascade.set_cycle(Some(2025)).unwrap();
        cascade.grades.commit(fetch.generation, Ok(vec![grade(7, "7mo Grado")]));
        let fetch = cascade.set_grade(Some(7)).unwrap();
        cascade.sections.commit(fetch.generation, Ok(vec![section(1, 7, "A")]));

        let fetch = cascade.set_section(Some(1)).expect("courses fetch");
        assert_eq!(fetch.stage, Stage::Courses);
        assert_eq!(fetch.parent_id, 7);
    }

    #[test]
    fn overtaken_grade_fetch_cannot_overwrite_newer_options() {
        let mut cascade = Cascade::new();
        let slow = cascade.set_cycle(Some(2025)).unwrap();
        let fast = cascade.set_cycle(Some(2026)).unwrap();

        assert!(cascade.grades.commit(fast.generation, Ok(vec![grade(9, "9no Grado")])));
        // The 2025 response arrives late and must be dropped.
        assert!(!cascade.grades.commit(slow.generation, Ok(vec![grade(7, "7mo Grado")])));
        assert_eq!(cascade.grades.items().len(), 1);
        assert_eq!(cascade.grades.items()[0].id, 9);
    }

    #[test]
    fn reset_clears_the_whole_chain() {
        let mut cascade = Cascade::new();
        let generation = cascade.begin_cycles();
        cascade.cycles.commit(
            generation,
            Ok(vec![SchoolCycle {
                id: 2025,
                name: "Ciclo 2025".to_string(),
                start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
                is_active: true,
                is_closed: false,
            }]),
        );
        cascade.set_cycle(Some(2025));
        cascade.reset();
        assert_eq!(cascade.cycle(), None);
        assert!(cascade.cycles.items().is_empty());
        assert!(!cascade.grades.is_loading());
    }
}
