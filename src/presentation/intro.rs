//! Opening segments: the paper title and the research questions.

use crate::foundation::error::ReelResult;
use crate::presentation::data::{PAPER_AUTHORS, PAPER_SUBTITLE, PAPER_TITLE, RESEARCH_QUESTIONS};
use crate::presentation::{Stage, group};
use crate::scene::mobject::{DOWN, FRAME_WIDTH, LEFT, Layout, MED_LARGE_BUFF, ORIGIN, arrange};
use crate::scene::shapes::{Text, title as section_title};
use crate::timeline::animate::{Animation, Play};

pub(crate) fn title(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let mut lines = vec![
        Text::tex(PAPER_TITLE[0]).font_size(42.0).build(&fonts)?,
        Text::tex(PAPER_TITLE[1]).font_size(42.0).build(&fonts)?,
        Text::plain(PAPER_SUBTITLE).font_size(32.0).italic().build(&fonts)?,
        Text::plain(PAPER_AUTHORS).font_size(28.0).build(&fonts)?,
    ];
    arrange(&mut lines, DOWN, 0.4, ORIGIN);
    let card = stage.add(group("title card", lines));

    stage.play(Play::new(Animation::Write(card)))?;
    stage.wait(4.0)?;
    stage.play(Play::new(Animation::FadeOut(card)))?;
    stage.wait(1.0)
}

pub(crate) fn research_questions(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading = section_title(&fonts, "Research Questions")?;
    let heading_box = heading.bbox();

    let mut questions = RESEARCH_QUESTIONS
        .iter()
        .map(|q| {
            let mut m = Text::plain(*q).font_size(32.0).build(&fonts)?;
            m.fit_width(FRAME_WIDTH - 1.0);
            Ok(m)
        })
        .collect::<ReelResult<Vec<_>>>()?;
    arrange(&mut questions, DOWN, 0.7, LEFT);
    questions.next_to(heading_box, DOWN, MED_LARGE_BUFF);

    let heading = stage.add(heading);
    let ids = stage.add_all(questions);
    let mut all = vec![heading];
    all.extend(&ids);

    stage.play(Play::new(Animation::Write(heading)))?;
    for (id, hold) in ids.into_iter().zip([2.0, 2.0, 3.0]) {
        stage.play(Play::new(Animation::Write(id)))?;
        stage.wait(hold)?;
    }
    stage.clear(&all)?;
    stage.wait(1.0)
}
