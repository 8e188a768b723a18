//! Subject aggregation

use crate::error::{Result, StudyError};
use crate::models::{Subject, Visit};

/// Group a subject's visits into one `Subject`
///
/// The subject id is taken from the first visit. Exactly one initial visit
/// is required; a return visit is optional. Surplus visits of either kind and
/// visits of another subject are logged and left out.
pub fn assemble_subject<I>(first: Visit, others: I) -> Result<Subject>
where
    I: IntoIterator<Item = Visit>,
{
    let subject_id = first.subject_id.clone();
    let mut initial: Option<Visit> = None;
    let mut return_visit: Option<Visit> = None;

    for visit in std::iter::once(first).chain(others) {
        if visit.subject_id != subject_id {
            log::warn!(
                "Visit {} belongs to subject {}, not {subject_id}; left out",
                visit.folder.display(),
                visit.subject_id
            );
            continue;
        }

        let slot = if visit.return_visit {
            &mut return_visit
        } else {
            &mut initial
        };
        if let Some(kept) = slot.as_ref() {
            log::warn!(
                "Subject {subject_id} has more than one {} visit; keeping {}, leaving out {}",
                if visit.return_visit { "return" } else { "initial" },
                kept.folder.display(),
                visit.folder.display()
            );
            continue;
        }
        *slot = Some(visit);
    }

    let Some(initial) = initial else {
        let path = return_visit
            .as_ref()
            .map(|v| v.folder.clone())
            .unwrap_or_default();
        return Err(StudyError::SubjectNotFound {
            path,
            subject_id: format!("{subject_id} (no initial visit)"),
        });
    };

    let mut subject = Subject::new(&subject_id, initial);
    if let Some(visit) = return_visit {
        subject.attach_return_visit(visit);
    }
    Ok(subject)
}
